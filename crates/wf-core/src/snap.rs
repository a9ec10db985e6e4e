//! Snap resolution: pointer position → nearest connectable handle.

use crate::geometry::anchor_point;
use crate::model::{FlowNode, Handle, NodeKind};
use kurbo::Point;

/// Default snap radius in document units.
pub const SNAP_RADIUS: f64 = 20.0;

/// A handle the pointer snapped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    pub node_id: crate::id::NodeId,
    pub node_kind: NodeKind,
    pub handle: Handle,
    /// The handle's anchor point, i.e. the snapped endpoint position.
    pub point: Point,
}

/// Find the handle anchor strictly closest to `pointer` within `radius`.
///
/// Scans every handle of every node in `[left, right, right-yes, right-no]`
/// order; ties keep the first hit. Returns `None` when nothing is within
/// radius; the caller then uses the raw pointer as a free endpoint.
pub fn find_snap_target(pointer: Point, nodes: &[FlowNode], radius: f64) -> Option<SnapTarget> {
    let mut closest: Option<SnapTarget> = None;
    let mut min_distance = radius;

    for node in nodes {
        for handle in Handle::ALL {
            let anchor = anchor_point(node, handle);
            let distance = pointer.distance(anchor);
            if distance < min_distance {
                min_distance = distance;
                closest = Some(SnapTarget {
                    node_id: node.id,
                    node_kind: node.kind,
                    handle,
                    point: anchor,
                });
            }
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;
    use crate::model::NodeKind;

    fn node_at(x: f64, y: f64) -> FlowNode {
        FlowNode::new(NodeId::fresh(), NodeKind::Process, "n", x, y)
    }

    #[test]
    fn exact_anchor_always_resolves() {
        let nodes = vec![node_at(100.0, 100.0)];
        let anchor = anchor_point(&nodes[0], Handle::Right);
        let hit = find_snap_target(anchor, &nodes, SNAP_RADIUS).unwrap();
        assert_eq!(hit.handle, Handle::Right);
        assert_eq!(hit.point, anchor);
    }

    #[test]
    fn outside_radius_resolves_to_none() {
        let nodes = vec![node_at(0.0, 0.0)];
        // Far from every handle of the 200x100 box
        let miss = find_snap_target(Point::new(1000.0, 1000.0), &nodes, SNAP_RADIUS);
        assert!(miss.is_none());

        // Exactly at the radius is not *strictly* within it
        let left = anchor_point(&nodes[0], Handle::Left);
        let edge = Point::new(left.x - SNAP_RADIUS, left.y);
        assert!(find_snap_target(edge, &nodes, SNAP_RADIUS).is_none());
    }

    #[test]
    fn closest_handle_wins() {
        let nodes = vec![node_at(0.0, 0.0)];
        // Slightly above the yes-output (25% height) on the right edge
        let probe = Point::new(200.0, 28.0);
        let hit = find_snap_target(probe, &nodes, SNAP_RADIUS).unwrap();
        assert_eq!(hit.handle, Handle::RightYes);
    }

    #[test]
    fn tie_breaks_by_iteration_order() {
        // Two nodes stacked so the probe is equidistant from a handle of each
        let a = node_at(0.0, 0.0);
        let b = node_at(0.0, 10.0);
        let nodes = vec![a.clone(), b.clone()];
        let mid = Point::new(0.0, 55.0); // 5 from a.left (y=50), 5 from b.left (y=60)
        let hit = find_snap_target(mid, &nodes, SNAP_RADIUS).unwrap();
        assert_eq!(hit.node_id, a.id, "first node in iteration order wins ties");
    }
}
