//! The persisted document format.
//!
//! A workflow is stored as a single JSON object with `nodes`, `connections`,
//! a fixed `version` string, and a `savedAt` timestamp. Loading validates
//! only that both collections are present; anything else is a user-facing
//! load error with no partial apply.

use crate::model::{Connection, FlowGraph, FlowNode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The document format version stamped on every save.
pub const DOCUMENT_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum DocumentError {
    /// The JSON was readable but is not a workflow document.
    #[error("invalid workflow document: missing `nodes` or `connections`")]
    MissingCollections,

    /// The JSON could not be parsed into the document shape.
    #[error("malformed workflow document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The unit of persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<FlowNode>,
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "savedAt", default)]
    pub saved_at: String,
}

impl GraphDocument {
    /// Parse a document from JSON.
    ///
    /// Only the presence of the `nodes` and `connections` keys is checked
    /// up front; their contents then deserialize strictly.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let present = value.get("nodes").is_some() && value.get("connections").is_some();
        if !present {
            return Err(DocumentError::MissingCollections);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize as pretty-printed JSON (the on-disk representation).
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FlowGraph {
    /// Snapshot this graph as a document stamped with `saved_at`.
    ///
    /// Absent notes are normalized to empty strings so every persisted node
    /// carries a `note` field.
    pub fn to_document(&self, saved_at: impl Into<String>) -> GraphDocument {
        let nodes = self
            .nodes
            .iter()
            .cloned()
            .map(|mut n| {
                n.note = Some(n.note.unwrap_or_default());
                n
            })
            .collect();

        GraphDocument {
            nodes,
            connections: self.connections.clone(),
            version: DOCUMENT_VERSION.to_string(),
            saved_at: saved_at.into(),
        }
    }

    /// Build a graph from a loaded document. The document was already
    /// validated when it was parsed, so this cannot fail.
    pub fn from_document(doc: GraphDocument) -> Self {
        Self {
            nodes: doc.nodes,
            connections: doc.connections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeId;
    use crate::model::{Handle, NodeKind};
    use kurbo::Point;
    use pretty_assertions::assert_eq;

    fn sample_graph() -> FlowGraph {
        let mut g = FlowGraph::new();
        g.add_node(NodeKind::Start, Point::new(0.0, 0.0));
        let b = g.add_node(NodeKind::Process, Point::new(300.0, 40.0));
        g.set_note(b, "hello\n[ ] ship it");
        g
    }

    #[test]
    fn document_roundtrip() {
        let g = sample_graph();
        let doc = g.to_document("2024-01-05T10:00:00Z");
        let json = doc.to_json().unwrap();
        let loaded = GraphDocument::from_json(&json).unwrap();

        assert_eq!(loaded.version, "1.0");
        assert_eq!(loaded.saved_at, "2024-01-05T10:00:00Z");
        assert_eq!(loaded.nodes.len(), 2);
        assert_eq!(loaded.connections.len(), 1);
        assert_eq!(loaded.nodes[1].note.as_deref(), Some("hello\n[ ] ship it"));

        let restored = FlowGraph::from_document(loaded);
        assert_eq!(restored.nodes.len(), g.nodes.len());
        assert_eq!(restored.connections.len(), g.connections.len());
    }

    #[test]
    fn save_normalizes_absent_notes() {
        let g = sample_graph();
        let doc = g.to_document("t");
        assert_eq!(doc.nodes[0].note.as_deref(), Some(""));
    }

    #[test]
    fn missing_connections_is_invalid() {
        let err = GraphDocument::from_json(r#"{"nodes": []}"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingCollections));
    }

    #[test]
    fn missing_nodes_is_invalid() {
        let err = GraphDocument::from_json(r#"{"connections": []}"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingCollections));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            GraphDocument::from_json("not json at all"),
            Err(DocumentError::Malformed(_))
        ));
    }

    #[test]
    fn version_and_timestamp_default_when_absent() {
        let doc = GraphDocument::from_json(r#"{"nodes": [], "connections": []}"#).unwrap();
        assert_eq!(doc.version, "");
        assert_eq!(doc.saved_at, "");
    }

    #[test]
    fn json_field_names_match_the_wire_format() {
        let mut g = FlowGraph::new();
        let a = g.add_node(NodeKind::Condition, Point::new(0.0, 0.0));
        let b = g.add_node(NodeKind::End, Point::new(300.0, 0.0));
        g.create_connection(a, Handle::RightYes, b, Handle::Left, Some("Yes".into()));

        let json = g.to_document("t").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let node = &value["nodes"][0];
        assert_eq!(node["type"], "condition");
        assert!(node.get("kind").is_none());

        let conn = &value["connections"][1];
        assert_eq!(conn["sourceHandle"], "right-yes");
        assert_eq!(conn["label"], "Yes");
        assert_eq!(
            conn["sourceId"],
            serde_json::Value::String(NodeId::as_str(&a).to_string())
        );
        assert_eq!(value["savedAt"], "t");
    }
}
