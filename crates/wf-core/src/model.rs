//! Core data model for flowchart documents.
//!
//! A document is a flat, ordered pair of collections: nodes and the curved
//! directional connections between them. Order matters: it is the paint
//! order on the canvas and the order persisted to JSON, and `add_node`
//! auto-chains from the *last element* of the node list.
//!
//! All mutations are synchronous and total: invalid requests (self-loop,
//! duplicate connection, yes/no handle on a non-condition source) are
//! defined no-ops, never errors.

use crate::id::{ConnectionId, NodeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Node kinds ──────────────────────────────────────────────────────────

/// The flowchart node types. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    Process,
    Condition,
    Action,
    End,
}

impl NodeKind {
    /// Human-readable label, used for default node titles.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::Process => "Process",
            NodeKind::Condition => "Condition",
            NodeKind::Action => "Action",
            NodeKind::End => "End",
        }
    }
}

// ─── Handles ─────────────────────────────────────────────────────────────

/// A named connection point on a node's edge.
///
/// `RightYes` / `RightNo` are the labeled outputs of condition nodes,
/// placed at 25% / 75% of the node height on the right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handle {
    Left,
    Right,
    RightYes,
    RightNo,
}

impl Handle {
    /// Every handle, in snap-resolution order.
    pub const ALL: [Handle; 4] = [Handle::Left, Handle::Right, Handle::RightYes, Handle::RightNo];

    /// Whether this handle sits on the right edge. Determines which way
    /// a connection curve leaves or enters the node.
    pub fn is_right_side(&self) -> bool {
        matches!(self, Handle::Right | Handle::RightYes | Handle::RightNo)
    }

    /// The connection label implied by grabbing this handle
    /// ("Yes"/"No" on condition outputs).
    pub fn implied_label(&self) -> Option<&'static str> {
        match self {
            Handle::RightYes => Some("Yes"),
            Handle::RightNo => Some("No"),
            _ => None,
        }
    }

    /// The handles a node of `kind` actually exposes for interaction.
    /// Condition nodes trade the plain right output for labeled yes/no.
    pub fn for_kind(kind: NodeKind) -> SmallVec<[Handle; 4]> {
        match kind {
            NodeKind::Condition => {
                SmallVec::from_slice(&[Handle::Left, Handle::RightYes, Handle::RightNo])
            }
            _ => SmallVec::from_slice(&[Handle::Left, Handle::Right]),
        }
    }
}

// ─── Nodes & connections ─────────────────────────────────────────────────

/// A single flowchart node. Position is document-space, top-left anchored.
/// Width/height are fixed render constants (see `geometry`), not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub title: String,
    pub x: f64,
    pub y: f64,
    /// Free-text note; may embed a task list (see `annotation`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FlowNode {
    pub fn new(id: NodeId, kind: NodeKind, title: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            x,
            y,
            note: None,
        }
    }

    /// Top-left corner as a point.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A directed, curved link between two node handles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    #[serde(rename = "sourceId")]
    pub source_id: NodeId,
    #[serde(rename = "sourceHandle")]
    pub source_handle: Handle,
    #[serde(rename = "targetId")]
    pub target_id: NodeId,
    #[serde(rename = "targetHandle")]
    pub target_handle: Handle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

// ─── Flow graph ──────────────────────────────────────────────────────────

/// The node and connection collections plus their mutation operations.
///
/// Owned per editor instance; constructed explicitly, never a global.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub connections: Vec<Connection>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Lookup ──

    pub fn node(&self, id: NodeId) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut FlowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// The last element of the node list, i.e. the auto-chain source.
    pub fn last_node(&self) -> Option<&FlowNode> {
        self.nodes.last()
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    // ── Mutations ──

    /// Add a node of `kind` at `position`, titled "New {label}".
    ///
    /// If any node already exists, the last element of the node list is
    /// auto-connected to the new node via a default right→left connection.
    /// After deletions or reloads that may not be the most recently added
    /// node; this matches the shipped behavior and users rely on it for
    /// quick chain building.
    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> NodeId {
        let id = NodeId::fresh();
        let node = FlowNode::new(id, kind, format!("New {}", kind.label()), position.x, position.y);

        let chain_source = self.last_node().map(|n| n.id);
        self.nodes.push(node);

        if let Some(source) = chain_source {
            self.create_connection(source, Handle::Right, id, Handle::Left, None);
        }

        id
    }

    /// Move a node to an absolute document-space position.
    pub fn move_node(&mut self, id: NodeId, position: Point) {
        if let Some(node) = self.node_mut(id) {
            node.x = position.x;
            node.y = position.y;
        }
    }

    /// Replace a node's title.
    pub fn rename_node(&mut self, id: NodeId, title: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.title = title.into();
        }
    }

    /// Replace a node's note text.
    pub fn set_note(&mut self, id: NodeId, note: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.note = Some(note.into());
        }
    }

    /// Delete a node and, atomically, every connection referencing it.
    pub fn delete_node(&mut self, id: NodeId) {
        self.nodes.retain(|n| n.id != id);
        self.connections
            .retain(|c| c.source_id != id && c.target_id != id);
    }

    /// Create a connection between two node handles.
    ///
    /// Silent no-op (returns `None`) on:
    /// - self-loop (`source == target`)
    /// - exact duplicate of (source, source handle, target, target handle, label)
    /// - dangling source or target id
    /// - `right-yes`/`right-no` source handle on a non-condition node
    pub fn create_connection(
        &mut self,
        source_id: NodeId,
        source_handle: Handle,
        target_id: NodeId,
        target_handle: Handle,
        label: Option<String>,
    ) -> Option<ConnectionId> {
        if source_id == target_id {
            log::debug!("rejected self-loop connection on {source_id}");
            return None;
        }
        let source = self.node(source_id)?;
        self.node(target_id)?;

        if source_handle.implied_label().is_some() && source.kind != NodeKind::Condition {
            log::debug!(
                "rejected {source_handle:?} source handle on non-condition node {source_id}"
            );
            return None;
        }

        let duplicate = self.connections.iter().any(|c| {
            c.source_id == source_id
                && c.target_id == target_id
                && c.source_handle == source_handle
                && c.target_handle == target_handle
                && c.label == label
        });
        if duplicate {
            log::debug!("rejected duplicate connection {source_id} -> {target_id}");
            return None;
        }

        let id = ConnectionId::fresh();
        self.connections.push(Connection {
            id,
            source_id,
            source_handle,
            target_id,
            target_handle,
            label,
        });
        Some(id)
    }

    /// Delete a connection by id.
    pub fn delete_connection(&mut self, id: ConnectionId) {
        self.connections.retain(|c| c.id != id);
    }

    /// Replace both collections wholesale (document load).
    pub fn replace(&mut self, nodes: Vec<FlowNode>, connections: Vec<Connection>) {
        self.nodes = nodes;
        self.connections = connections;
    }
}
