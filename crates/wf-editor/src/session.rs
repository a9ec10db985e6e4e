//! One open document: graph + viewport + interaction + note editing.
//!
//! `EditorSession` is the single entry point a frontend drives. Input
//! events flow through the interaction controller, which emits
//! `GraphMutation`s; the session applies them to the graph. Note edits go
//! through the open `NoteEditor` and are written back on a debounced
//! timer via `tick`.

use std::time::Instant;

use crate::autosave::NoteAutosave;
use crate::controller::{GraphMutation, InteractionController};
use crate::input::InputEvent;
use crate::note::NoteEditor;
use wf_core::document::GraphDocument;
use wf_core::viewport::{ViewportSize, ViewportTransform};
use wf_core::{ConnectionId, FlowGraph, NodeId, NodeKind, Point};

pub struct EditorSession {
    pub graph: FlowGraph,
    pub viewport: ViewportTransform,
    pub controller: InteractionController,
    autosave: NoteAutosave,
    open_note: Option<NoteEditor>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(ViewportSize::default())
    }
}

impl EditorSession {
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            graph: FlowGraph::new(),
            viewport: ViewportTransform::new(viewport),
            controller: InteractionController::new(),
            autosave: NoteAutosave::new(),
            open_note: None,
        }
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Feed one input event through the controller and apply whatever it
    /// emits. Returns the applied mutations so callers can observe them.
    pub fn input(&mut self, event: &InputEvent) -> Vec<GraphMutation> {
        let mutations = self
            .controller
            .handle(event, &self.graph, &mut self.viewport);
        for mutation in &mutations {
            self.apply(mutation.clone());
        }
        mutations
    }

    /// Apply a single mutation to the graph.
    pub fn apply(&mut self, mutation: GraphMutation) {
        match mutation {
            GraphMutation::AddNode { kind, x, y } => {
                self.graph.add_node(kind, Point::new(x, y));
            }
            GraphMutation::MoveNode { id, x, y } => {
                self.graph.move_node(id, Point::new(x, y));
            }
            GraphMutation::RenameNode { id, title } => {
                self.graph.rename_node(id, title);
            }
            GraphMutation::DeleteNode { id } => {
                // An open note on the deleted node has nothing to attach to.
                if self.open_note.as_ref().is_some_and(|n| n.node_id() == id) {
                    self.open_note = None;
                    self.autosave.flush();
                }
                self.graph.delete_node(id);
            }
            GraphMutation::CreateConnection {
                source_id,
                source_handle,
                target_id,
                target_handle,
                label,
            } => {
                self.graph
                    .create_connection(source_id, source_handle, target_id, target_handle, label);
            }
            GraphMutation::DeleteConnection { id } => {
                self.graph.delete_connection(id);
            }
            GraphMutation::SetNote { id, note } => {
                self.graph.set_note(id, note);
            }
        }
    }

    // ─── Toolbar ─────────────────────────────────────────────────────────

    /// Add a node of `kind` at the visual center of the canvas and select
    /// it, as the toolbar buttons do.
    pub fn add_node_from_toolbar(&mut self, kind: NodeKind) -> NodeId {
        let position = self.viewport.center_spawn_position();
        let id = self.graph.add_node(kind, position);
        self.controller.selected = Some(id);
        id
    }

    /// Delete a connection directly (click on its label/curve).
    pub fn delete_connection(&mut self, id: ConnectionId) {
        self.graph.delete_connection(id);
    }

    /// Zoom buttons: adjust scale by `delta`, clamped by the viewport.
    pub fn zoom(&mut self, delta: f64) {
        self.viewport.zoom(delta);
    }

    /// Fit the view to the current node set.
    pub fn fit_view(&mut self) {
        self.viewport.fit_to_content(&self.graph.nodes);
    }

    // ─── Notes ───────────────────────────────────────────────────────────

    /// Open the note panel for a node. Any previously open note is closed
    /// (and its pending edits written) first. Returns false if the node
    /// does not exist.
    pub fn open_note(&mut self, id: NodeId) -> bool {
        self.close_note();
        let Some(node) = self.graph.node(id) else {
            return false;
        };
        self.open_note = Some(NoteEditor::open(id, node.note.as_deref()));
        true
    }

    pub fn note(&self) -> Option<&NoteEditor> {
        self.open_note.as_ref()
    }

    /// Type one character into the open note's free-text field. `[` appends
    /// a new task instead and returns its index. Schedules a debounced save.
    pub fn note_insert_char(&mut self, cursor: usize, c: char, now: Instant) -> Option<usize> {
        let editor = self.open_note.as_mut()?;
        let new_task = editor.insert_char(cursor, c);
        let (id, text) = (editor.node_id(), editor.text().to_string());
        self.autosave.schedule(id, text, now);
        new_task
    }

    /// Replace the open note's free-text field wholesale.
    pub fn note_set_free_text(&mut self, text: &str, now: Instant) {
        if let Some(editor) = self.open_note.as_mut() {
            editor.set_free_text(text);
            let (id, text) = (editor.node_id(), editor.text().to_string());
            self.autosave.schedule(id, text, now);
        }
    }

    /// Flip a task checkbox in the open note.
    pub fn note_toggle_task(&mut self, index: usize, now: Instant) {
        if let Some(editor) = self.open_note.as_mut() {
            editor.toggle_task(index);
            let (id, text) = (editor.node_id(), editor.text().to_string());
            self.autosave.schedule(id, text, now);
        }
    }

    /// Retitle a task in the open note.
    pub fn note_set_task_text(&mut self, index: usize, text: &str, now: Instant) {
        if let Some(editor) = self.open_note.as_mut() {
            editor.set_task_text(index, text);
            let (id, text) = (editor.node_id(), editor.text().to_string());
            self.autosave.schedule(id, text, now);
        }
    }

    /// Drive the debounce clock: writes the pending note back once its
    /// quiet period has elapsed. Call on every frame (or timer tick).
    pub fn tick(&mut self, now: Instant) {
        if let Some((id, note)) = self.autosave.poll(now) {
            self.apply(GraphMutation::SetNote { id, note });
        }
    }

    /// Close the note panel, writing any pending edit back immediately.
    pub fn close_note(&mut self) {
        if let Some((id, note)) = self.autosave.flush() {
            self.apply(GraphMutation::SetNote { id, note });
        }
        self.open_note = None;
    }

    // ─── Documents ───────────────────────────────────────────────────────

    /// Replace the session contents with a loaded document: any in-flight
    /// gesture, selection, open note, and pending autosave are dropped, and
    /// the view is fitted to the loaded content.
    pub fn apply_document(&mut self, doc: GraphDocument) {
        self.open_note = None;
        self.autosave.flush();
        self.controller.reset();
        self.graph = FlowGraph::from_document(doc);
        self.viewport.fit_to_content(&self.graph.nodes);
    }

    /// Snapshot the current graph for saving, flushing any pending note
    /// edit first so the snapshot is never stale.
    pub fn snapshot(&mut self, saved_at: impl Into<String>) -> GraphDocument {
        if let Some((id, note)) = self.autosave.flush() {
            self.apply(GraphMutation::SetNote { id, note });
        }
        self.graph.to_document(saved_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn toolbar_add_spawns_at_canvas_center_and_selects() {
        let mut session = EditorSession::default();
        let id = session.add_node_from_toolbar(NodeKind::Process);

        let node = session.graph.node(id).unwrap();
        // 800x600 default viewport, no scroll, 100% zoom
        assert_eq!((node.x, node.y), (300.0, 250.0));
        assert_eq!(session.controller.selected, Some(id));
    }

    #[test]
    fn deleting_noted_node_drops_its_open_editor() {
        let mut session = EditorSession::default();
        let id = session.add_node_from_toolbar(NodeKind::Process);
        assert!(session.open_note(id));

        let t0 = Instant::now();
        session.note_set_free_text("doomed", t0);
        session.apply(GraphMutation::DeleteNode { id });

        assert!(session.note().is_none());
        // The pending save went with it
        session.tick(t0 + Duration::from_secs(1));
        assert!(session.graph.node(id).is_none());
    }

    #[test]
    fn snapshot_includes_unflushed_note_edit() {
        let mut session = EditorSession::default();
        let id = session.add_node_from_toolbar(NodeKind::Action);
        session.open_note(id);
        session.note_set_free_text("fresh", Instant::now());

        // Debounce hasn't fired, but the snapshot must not be stale
        let doc = session.snapshot("t");
        assert_eq!(doc.nodes[0].note.as_deref(), Some("fresh"));
    }
}
