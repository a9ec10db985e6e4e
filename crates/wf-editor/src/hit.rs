//! Hit testing: document-space point → what's under the pointer.
//!
//! Handles are checked before node bodies (they overhang the node edge),
//! and nodes are walked back-to-front so the topmost painted node wins.

use wf_core::geometry::{anchor_point, NODE_HEIGHT, NODE_WIDTH};
use wf_core::{FlowNode, Handle, NodeId, Point};

/// How close (document units) a press must be to a handle anchor to grab it.
pub const HANDLE_HIT_RADIUS: f64 = 10.0;

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget {
    /// Empty canvas background.
    Canvas,
    /// A node's body rectangle.
    NodeBody(NodeId),
    /// A connection handle on a node's edge.
    Handle(NodeId, Handle),
}

/// Find the topmost hit at a document-space position.
///
/// Only the handles a node's kind actually exposes are grabbable here:
/// a process node has no yes/no outputs to press, even though the snap
/// resolver considers those anchors when *ending* a drag.
pub fn hit_test(point: Point, nodes: &[FlowNode]) -> HitTarget {
    // Handles first, topmost node first
    for node in nodes.iter().rev() {
        for handle in Handle::for_kind(node.kind) {
            if point.distance(anchor_point(node, handle)) <= HANDLE_HIT_RADIUS {
                return HitTarget::Handle(node.id, handle);
            }
        }
    }

    for node in nodes.iter().rev() {
        let inside = point.x >= node.x
            && point.x <= node.x + NODE_WIDTH
            && point.y >= node.y
            && point.y <= node.y + NODE_HEIGHT;
        if inside {
            return HitTarget::NodeBody(node.id);
        }
    }

    HitTarget::Canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::NodeKind;

    fn node(kind: NodeKind, x: f64, y: f64) -> FlowNode {
        FlowNode::new(NodeId::fresh(), kind, "n", x, y)
    }

    #[test]
    fn body_hit_and_miss() {
        let nodes = vec![node(NodeKind::Process, 100.0, 100.0)];
        assert_eq!(
            hit_test(Point::new(180.0, 150.0), &nodes),
            HitTarget::NodeBody(nodes[0].id)
        );
        assert_eq!(hit_test(Point::new(500.0, 500.0), &nodes), HitTarget::Canvas);
    }

    #[test]
    fn handle_beats_body() {
        let nodes = vec![node(NodeKind::Process, 0.0, 0.0)];
        // Just inside the body but within handle radius of the left anchor
        let hit = hit_test(Point::new(4.0, 50.0), &nodes);
        assert_eq!(hit, HitTarget::Handle(nodes[0].id, Handle::Left));
    }

    #[test]
    fn condition_exposes_yes_no_not_plain_right() {
        let nodes = vec![node(NodeKind::Condition, 0.0, 0.0)];
        let yes = hit_test(Point::new(200.0, 25.0), &nodes);
        assert_eq!(yes, HitTarget::Handle(nodes[0].id, Handle::RightYes));

        // The right-edge midpoint is not a handle on a condition node;
        // it's 25 units from both outputs, outside the hit radius.
        let mid = hit_test(Point::new(200.0, 50.0), &nodes);
        assert_eq!(mid, HitTarget::NodeBody(nodes[0].id));
    }

    #[test]
    fn topmost_node_wins_overlap() {
        let bottom = node(NodeKind::Start, 0.0, 0.0);
        let top = node(NodeKind::Action, 50.0, 20.0);
        let nodes = vec![bottom, top.clone()];
        assert_eq!(
            hit_test(Point::new(100.0, 60.0), &nodes),
            HitTarget::NodeBody(top.id)
        );
    }
}
