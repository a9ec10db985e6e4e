pub mod annotation;
pub mod document;
pub mod geometry;
pub mod id;
pub mod model;
pub mod snap;
pub mod viewport;

pub use document::{DocumentError, GraphDocument, DOCUMENT_VERSION};
pub use geometry::{anchor_point, curve_path, NODE_HEIGHT, NODE_WIDTH};
pub use id::{ConnectionId, NodeId};
pub use model::*;
pub use snap::{find_snap_target, SnapTarget, SNAP_RADIUS};
pub use viewport::{ViewportSize, ViewportTransform, MAX_SCALE, MIN_SCALE};

// Re-export kurbo's geometry primitives so downstream crates don't need a
// direct dependency for points and vectors.
pub use kurbo::{Point, Vec2};
