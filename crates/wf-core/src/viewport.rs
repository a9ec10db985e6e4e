//! Viewport transform: zoom, scroll, and coordinate-space conversion.
//!
//! The model is all document-space; the canvas shows it scaled by `scale`
//! with its origin shifted by `scroll`. Every pointer event must go through
//! `screen_to_doc`; dragging math that forgets to invert the transform is
//! only correct at 100% zoom.

use crate::geometry::{NODE_HEIGHT, NODE_WIDTH};
use crate::model::FlowNode;
use kurbo::{Point, Rect, Vec2};

pub const MIN_SCALE: f64 = 0.25;
pub const MAX_SCALE: f64 = 2.0;

/// Padding around the content bounding box for fit-to-content.
const FIT_PADDING: f64 = 50.0;

/// The canvas (client area) dimensions in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Scale + scroll state for one editor canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportTransform {
    pub scale: f64,
    /// Scroll offset of the canvas content.
    pub scroll: Vec2,
    pub size: ViewportSize,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new(ViewportSize::default())
    }
}

impl ViewportTransform {
    pub fn new(size: ViewportSize) -> Self {
        Self {
            scale: 1.0,
            scroll: Vec2::ZERO,
            size,
        }
    }

    /// Screen position → document position under the current transform.
    pub fn screen_to_doc(&self, p: Point) -> Point {
        Point::new(
            (p.x + self.scroll.x) / self.scale,
            (p.y + self.scroll.y) / self.scale,
        )
    }

    /// Document position → screen position. Inverse of `screen_to_doc`.
    pub fn doc_to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale - self.scroll.x,
            p.y * self.scale - self.scroll.y,
        )
    }

    /// Adjust zoom by `delta`, clamped to `[0.25, 2.0]`.
    pub fn zoom(&mut self, delta: f64) {
        self.scale = (self.scale + delta).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Pan the canvas by a screen-space pointer movement.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.scroll.x -= dx / self.scale;
        self.scroll.y -= dy / self.scale;
    }

    /// Fit the view to the node set: zoom out (never past 100%) until the
    /// padded content bounding box fits, and scroll its top-left into view.
    /// No-op when there are no nodes.
    ///
    /// The fitted scale may go below the interactive zoom floor; containing
    /// the content is the whole point of the operation, so it is not
    /// clamped the way `zoom` is.
    pub fn fit_to_content(&mut self, nodes: &[FlowNode]) {
        let Some(bounds) = content_bounds(nodes) else {
            return;
        };

        let width = bounds.width() + FIT_PADDING * 2.0;
        let height = bounds.height() + FIT_PADDING * 2.0;
        let scale = (self.size.width / width)
            .min(self.size.height / height)
            .min(1.0);

        self.scale = scale;
        self.scroll = Vec2::new(bounds.x0 - FIT_PADDING, bounds.y0 - FIT_PADDING);
    }

    /// Document-space position where a toolbar-added node lands: the
    /// visual center of the canvas, offset by half a node footprint.
    pub fn center_spawn_position(&self) -> Point {
        Point::new(
            (self.size.width / 2.0 + self.scroll.x - NODE_WIDTH / 2.0) / self.scale,
            (self.size.height / 2.0 + self.scroll.y - NODE_HEIGHT / 2.0) / self.scale,
        )
    }
}

/// Bounding box over every node's fixed footprint, or `None` when empty.
fn content_bounds(nodes: &[FlowNode]) -> Option<Rect> {
    let first = nodes.first()?;
    let mut rect = Rect::new(
        first.x,
        first.y,
        first.x + NODE_WIDTH,
        first.y + NODE_HEIGHT,
    );
    for node in &nodes[1..] {
        rect = rect.union(Rect::new(
            node.x,
            node.y,
            node.x + NODE_WIDTH,
            node.y + NODE_HEIGHT,
        ));
    }
    Some(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;
    use crate::model::NodeKind;

    fn node_at(x: f64, y: f64) -> FlowNode {
        FlowNode::new(NodeId::fresh(), NodeKind::Action, "n", x, y)
    }

    #[test]
    fn zoom_clamps_both_ways() {
        let mut vp = ViewportTransform::default();
        for _ in 0..50 {
            vp.zoom(10.0);
        }
        assert_eq!(vp.scale, MAX_SCALE);
        for _ in 0..50 {
            vp.zoom(-10.0);
        }
        assert_eq!(vp.scale, MIN_SCALE);
    }

    #[test]
    fn screen_doc_roundtrip_under_zoom() {
        let mut vp = ViewportTransform::default();
        vp.scroll = Vec2::new(120.0, -40.0);
        vp.scale = 0.5;

        let screen = Point::new(333.0, 77.0);
        let doc = vp.screen_to_doc(screen);
        let back = vp.doc_to_screen(doc);
        assert!((back.x - screen.x).abs() < 1e-9);
        assert!((back.y - screen.y).abs() < 1e-9);
    }

    #[test]
    fn pan_moves_against_pointer_scaled() {
        let mut vp = ViewportTransform::default();
        vp.scale = 2.0;
        vp.pan_by(10.0, -4.0);
        assert_eq!(vp.scroll, Vec2::new(-5.0, 2.0));
    }

    #[test]
    fn fit_on_empty_is_a_noop() {
        let mut vp = ViewportTransform::default();
        vp.scale = 1.5;
        vp.scroll = Vec2::new(9.0, 9.0);
        let before = vp.clone();
        vp.fit_to_content(&[]);
        assert_eq!(vp, before);
    }

    #[test]
    fn fit_zooms_out_but_never_in() {
        // Small content inside a large viewport: scale stays at 1.0
        let mut vp = ViewportTransform::default();
        vp.fit_to_content(&[node_at(0.0, 0.0)]);
        assert_eq!(vp.scale, 1.0);
        assert_eq!(vp.scroll, Vec2::new(-50.0, -50.0));

        // Wide content: scale shrinks to fit width
        let mut vp = ViewportTransform::default();
        vp.fit_to_content(&[node_at(0.0, 0.0), node_at(1500.0, 0.0)]);
        let content_width = 1500.0 + 200.0 + 100.0; // span + node + padding
        assert!((vp.scale - 800.0 / content_width).abs() < 1e-9);
        assert_eq!(vp.scroll, Vec2::new(-50.0, -50.0));
    }

    #[test]
    fn fit_contains_very_wide_content() {
        // Content far wider than 4x the viewport: the fitted scale must
        // drop below the interactive zoom floor so everything stays visible
        let mut vp = ViewportTransform::default();
        vp.fit_to_content(&[node_at(0.0, 0.0), node_at(10_000.0, 0.0)]);

        let content_width = 10_000.0 + 200.0 + 100.0; // span + node + padding
        assert!((vp.scale - 800.0 / content_width).abs() < 1e-9);
        assert!(vp.scale < MIN_SCALE);
        assert!(
            content_width * vp.scale <= vp.size.width + 1e-9,
            "padded content must fit the viewport width"
        );
    }

    #[test]
    fn center_spawn_accounts_for_scale_and_scroll() {
        let mut vp = ViewportTransform::default();
        vp.scale = 0.5;
        vp.scroll = Vec2::new(100.0, 60.0);
        let p = vp.center_spawn_position();
        assert_eq!(p.x, (400.0 + 100.0 - 100.0) / 0.5);
        assert_eq!(p.y, (300.0 + 60.0 - 50.0) / 0.5);
    }
}
