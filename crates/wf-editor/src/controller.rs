//! The pointer-event interaction state machine.
//!
//! One controller instance drives one canvas. States mirror the gestures a
//! user can be mid-way through: panning the canvas, dragging a node,
//! drawing a connection, or editing a node label. Pointer-move delivery is
//! gated by an explicit capture taken on state entry and released on exit,
//! so a move arriving after release can never mutate anything; it is the
//! equivalent of attaching document listeners only while a gesture is live.
//!
//! The controller converts every pointer position through the live
//! `ViewportTransform`; all drag and connect math happens in document
//! space, which is what keeps gestures correct at any zoom level.

use crate::hit::{hit_test, HitTarget};
use crate::input::InputEvent;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use wf_core::geometry::anchor_point;
use wf_core::snap::{find_snap_target, SnapTarget, SNAP_RADIUS};
use wf_core::viewport::ViewportTransform;
use wf_core::{ConnectionId, FlowGraph, Handle, NodeId, NodeKind, Point, Vec2};

/// A mutation the controller wants applied to the graph.
/// Emitted rather than applied directly so the session (and tests) can
/// observe and route them.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphMutation {
    AddNode { kind: NodeKind, x: f64, y: f64 },
    MoveNode { id: NodeId, x: f64, y: f64 },
    RenameNode { id: NodeId, title: String },
    DeleteNode { id: NodeId },
    CreateConnection {
        source_id: NodeId,
        source_handle: Handle,
        target_id: NodeId,
        target_handle: Handle,
        label: Option<String>,
    },
    DeleteConnection { id: ConnectionId },
    SetNote { id: NodeId, note: String },
}

/// An in-progress connection drag, exposed so the render layer can draw
/// the dashed preview curve.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingConnection {
    pub source_id: NodeId,
    pub source_handle: Handle,
    /// "Yes"/"No" when dragged off a condition output.
    pub label: Option<String>,
    /// The source anchor, fixed for the whole gesture.
    pub start: Point,
    /// Current endpoint: the snapped anchor when a snap target is live,
    /// otherwise the raw pointer position.
    pub cursor: Point,
    pub snap: Option<SnapTarget>,
}

/// The gesture currently in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerState {
    Idle,
    /// Scrolling the canvas; `last` is the previous screen position.
    PanningCanvas { last: Point },
    /// Moving a node; `offset` is pointer-to-origin in document space so
    /// the node doesn't jump to the pointer on the first move.
    DraggingNode { id: NodeId, offset: Vec2 },
    DrawingConnection(DrawingConnection),
    /// Inline title editing with a working buffer. The node's stored title
    /// is untouched until commit, so Escape reverts for free.
    EditingLabel { id: NodeId, buffer: String },
}

/// Which gesture currently owns pointer-move events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerCapture {
    Pan,
    Drag,
    Connect,
}

pub struct InteractionController {
    state: ControllerState,
    capture: Option<PointerCapture>,
    pub selected: Option<NodeId>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            state: ControllerState::Idle,
            capture: None,
            selected: None,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// The live connection preview, if one is being drawn.
    pub fn drawing(&self) -> Option<&DrawingConnection> {
        match &self.state {
            ControllerState::DrawingConnection(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_editing_label(&self) -> bool {
        matches!(self.state, ControllerState::EditingLabel { .. })
    }

    /// Drop any in-flight gesture and selection (document load, note open).
    pub fn reset(&mut self) {
        self.transition(ControllerState::Idle);
        self.selected = None;
    }

    /// Enter/exit actions in one place: entering a gesture state takes the
    /// pointer capture, leaving it releases it.
    fn transition(&mut self, next: ControllerState) {
        self.capture = match &next {
            ControllerState::PanningCanvas { .. } => Some(PointerCapture::Pan),
            ControllerState::DraggingNode { .. } => Some(PointerCapture::Drag),
            ControllerState::DrawingConnection(_) => Some(PointerCapture::Connect),
            ControllerState::Idle | ControllerState::EditingLabel { .. } => None,
        };
        log::trace!("interaction state -> {next:?}");
        self.state = next;
    }

    /// Feed one input event through the state machine.
    ///
    /// Reads the graph, converts coordinates through (and pans/zooms) the
    /// viewport, and returns the mutations to apply.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        graph: &FlowGraph,
        viewport: &mut ViewportTransform,
    ) -> Vec<GraphMutation> {
        match event {
            InputEvent::PointerDown { x, y, .. } => {
                self.on_pointer_down(Point::new(*x, *y), graph, viewport)
            }
            InputEvent::PointerMove { x, y, .. } => {
                self.on_pointer_move(Point::new(*x, *y), graph, viewport)
            }
            InputEvent::PointerUp { x, y, .. } => {
                self.on_pointer_up(Point::new(*x, *y), graph, viewport)
            }
            InputEvent::DoubleClick { x, y, .. } => {
                self.on_double_click(Point::new(*x, *y), graph, viewport)
            }
            InputEvent::Key { key, modifiers } => self.on_key(key, *modifiers, graph, viewport),
        }
    }

    fn on_pointer_down(
        &mut self,
        screen: Point,
        graph: &FlowGraph,
        viewport: &mut ViewportTransform,
    ) -> Vec<GraphMutation> {
        let mut mutations = Vec::new();

        // A press anywhere commits an open label edit (blur).
        if let ControllerState::EditingLabel { id, buffer } = &self.state {
            mutations.push(GraphMutation::RenameNode {
                id: *id,
                title: buffer.clone(),
            });
            self.transition(ControllerState::Idle);
        }

        let doc = viewport.screen_to_doc(screen);
        match hit_test(doc, &graph.nodes) {
            HitTarget::Handle(node_id, handle) => {
                if let Some(node) = graph.node(node_id) {
                    let start = anchor_point(node, handle);
                    self.transition(ControllerState::DrawingConnection(DrawingConnection {
                        source_id: node_id,
                        source_handle: handle,
                        label: handle.implied_label().map(str::to_string),
                        start,
                        cursor: start,
                        snap: None,
                    }));
                }
            }
            HitTarget::NodeBody(node_id) => {
                if let Some(node) = graph.node(node_id) {
                    self.selected = Some(node_id);
                    self.transition(ControllerState::DraggingNode {
                        id: node_id,
                        offset: doc - node.origin(),
                    });
                }
            }
            HitTarget::Canvas => {
                self.selected = None;
                self.transition(ControllerState::PanningCanvas { last: screen });
            }
        }

        mutations
    }

    fn on_pointer_move(
        &mut self,
        screen: Point,
        graph: &FlowGraph,
        viewport: &mut ViewportTransform,
    ) -> Vec<GraphMutation> {
        // No capture, no gesture: moves between gestures are ignored.
        if self.capture.is_none() {
            return Vec::new();
        }

        match &mut self.state {
            ControllerState::PanningCanvas { last } => {
                viewport.pan_by(screen.x - last.x, screen.y - last.y);
                *last = screen;
                Vec::new()
            }
            ControllerState::DraggingNode { id, offset } => {
                // Live commit: the node tracks the pointer on every move.
                let doc = viewport.screen_to_doc(screen);
                vec![GraphMutation::MoveNode {
                    id: *id,
                    x: doc.x - offset.x,
                    y: doc.y - offset.y,
                }]
            }
            ControllerState::DrawingConnection(drawing) => {
                let doc = viewport.screen_to_doc(screen);
                drawing.snap = find_snap_target(doc, &graph.nodes, SNAP_RADIUS);
                drawing.cursor = drawing.snap.map(|s| s.point).unwrap_or(doc);
                Vec::new()
            }
            ControllerState::Idle | ControllerState::EditingLabel { .. } => Vec::new(),
        }
    }

    fn on_pointer_up(
        &mut self,
        screen: Point,
        graph: &FlowGraph,
        viewport: &mut ViewportTransform,
    ) -> Vec<GraphMutation> {
        let mut mutations = Vec::new();

        if let ControllerState::DrawingConnection(drawing) = &self.state {
            // Resolve the snap at the release position itself; the target
            // must be a different node or the gesture is discarded.
            let doc = viewport.screen_to_doc(screen);
            if let Some(snap) = find_snap_target(doc, &graph.nodes, SNAP_RADIUS) {
                if snap.node_id != drawing.source_id {
                    mutations.push(GraphMutation::CreateConnection {
                        source_id: drawing.source_id,
                        source_handle: drawing.source_handle,
                        target_id: snap.node_id,
                        target_handle: snap.handle,
                        label: drawing.label.clone(),
                    });
                }
            }
        }

        match self.state {
            ControllerState::PanningCanvas { .. }
            | ControllerState::DraggingNode { .. }
            | ControllerState::DrawingConnection(_) => {
                self.transition(ControllerState::Idle);
            }
            _ => {}
        }

        mutations
    }

    fn on_double_click(
        &mut self,
        screen: Point,
        graph: &FlowGraph,
        viewport: &mut ViewportTransform,
    ) -> Vec<GraphMutation> {
        let doc = viewport.screen_to_doc(screen);
        if let HitTarget::NodeBody(node_id) = hit_test(doc, &graph.nodes) {
            if let Some(node) = graph.node(node_id) {
                self.selected = Some(node_id);
                self.transition(ControllerState::EditingLabel {
                    id: node_id,
                    buffer: node.title.clone(),
                });
            }
        }
        Vec::new()
    }

    fn on_key(
        &mut self,
        key: &str,
        modifiers: crate::input::Modifiers,
        graph: &FlowGraph,
        viewport: &mut ViewportTransform,
    ) -> Vec<GraphMutation> {
        // While a label edit is open, keys go to the buffer.
        if let ControllerState::EditingLabel { id, buffer } = &mut self.state {
            match key {
                "Enter" => {
                    let mutation = GraphMutation::RenameNode {
                        id: *id,
                        title: buffer.clone(),
                    };
                    self.transition(ControllerState::Idle);
                    return vec![mutation];
                }
                "Escape" => {
                    self.transition(ControllerState::Idle);
                    return Vec::new();
                }
                "Backspace" => {
                    buffer.pop();
                    return Vec::new();
                }
                _ => {
                    let mut chars = key.chars();
                    if let (Some(c), None) = (chars.next(), chars.next()) {
                        buffer.push(c);
                    }
                    return Vec::new();
                }
            }
        }

        match ShortcutMap::resolve(key, modifiers) {
            Some(ShortcutAction::DeleteSelection) => {
                if let Some(id) = self.selected.take() {
                    return vec![GraphMutation::DeleteNode { id }];
                }
                Vec::new()
            }
            Some(ShortcutAction::ZoomIn) => {
                viewport.zoom(0.1);
                Vec::new()
            }
            Some(ShortcutAction::ZoomOut) => {
                viewport.zoom(-0.1);
                Vec::new()
            }
            Some(ShortcutAction::ZoomToFit) => {
                viewport.fit_to_content(&graph.nodes);
                Vec::new()
            }
            Some(ShortcutAction::Cancel) => {
                self.transition(ControllerState::Idle);
                self.selected = None;
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}
