//! Pure geometry: handle anchor points and the S-curve between them.
//!
//! Everything here is document-space, independent of the current zoom
//! and scroll, which live in `viewport`.

use crate::model::{FlowNode, Handle};
use kurbo::{CubicBez, Point};

/// Fixed node footprint used for anchors and hit testing. The render layer
/// may grow a process node's visible height to fit its title; anchors stay
/// on the fixed box.
pub const NODE_WIDTH: f64 = 200.0;
pub const NODE_HEIGHT: f64 = 100.0;

/// Curve control-point offset bounds.
const CURVE_MIN: f64 = 80.0;
const CURVE_MAX: f64 = 200.0;

/// The document-space anchor point of `handle` on `node`.
///
/// `left`/`right` sit at the vertical midpoint of their edge; the condition
/// outputs `right-yes`/`right-no` sit at 25% and 75% of the node height.
pub fn anchor_point(node: &FlowNode, handle: Handle) -> Point {
    match handle {
        Handle::Left => Point::new(node.x, node.y + NODE_HEIGHT / 2.0),
        Handle::Right => Point::new(node.x + NODE_WIDTH, node.y + NODE_HEIGHT / 2.0),
        Handle::RightYes => Point::new(node.x + NODE_WIDTH, node.y + NODE_HEIGHT * 0.25),
        Handle::RightNo => Point::new(node.x + NODE_WIDTH, node.y + NODE_HEIGHT * 0.75),
    }
}

/// Cubic Bezier routing between two oriented anchor points.
///
/// Control points are pushed horizontally away from each node on the side
/// its handle faces, so the curve always leaves and enters horizontally,
/// including when the target is left of, or level with, the source. The
/// vertical offsets near each endpoint are asymmetric, giving the S shape.
pub fn curve_path(from: Point, to: Point, source_handle: Handle, target_handle: Handle) -> CubicBez {
    let dx = (to.x - from.x).abs();
    let intensity = (dx * 0.4).clamp(CURVE_MIN, CURVE_MAX);

    let source_sign = if source_handle.is_right_side() { 1.0 } else { -1.0 };
    let target_sign = if target_handle.is_right_side() { 1.0 } else { -1.0 };

    let source_control_x = from.x + intensity * source_sign;
    let target_control_x = to.x - intensity * target_sign;

    let vertical_offset = (to.y - from.y) * 0.5;
    let source_control_y = from.y + vertical_offset * 0.2;
    let target_control_y = to.y - vertical_offset * 0.2;

    CubicBez::new(
        from,
        Point::new(source_control_x, source_control_y),
        Point::new(target_control_x, target_control_y),
        to,
    )
}
