//! Note editing session for one node.
//!
//! Holds the working copy of the node's note string and routes edits
//! through the annotation projections. The free-text field and the task
//! list are both views over this one string; every edit goes back through
//! `wf_core::annotation` so they can never diverge.

use wf_core::annotation::{self, NoteContent, Task};
use wf_core::NodeId;

/// An open note editor attached to a node.
#[derive(Debug, Clone)]
pub struct NoteEditor {
    node_id: NodeId,
    text: String,
}

impl NoteEditor {
    /// Open on a node's current note (empty if the node has none).
    pub fn open(node_id: NodeId, note: Option<&str>) -> Self {
        Self {
            node_id,
            text: note.unwrap_or_default().to_string(),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// The canonical note string, exactly what gets saved.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn content(&self) -> NoteContent {
        annotation::parse(&self.text)
    }

    pub fn free_text(&self) -> String {
        self.content().free_text
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.content().tasks
    }

    /// Type one character into the free-text field at `cursor`
    /// (a byte offset into the free-text projection).
    ///
    /// `[` is the task trigger: the character is swallowed, a new empty
    /// unchecked task is appended, and its index is returned so the UI can
    /// focus it. Every other character is inserted normally.
    pub fn insert_char(&mut self, cursor: usize, c: char) -> Option<usize> {
        if c == '[' {
            let (text, index) = annotation::begin_task(&self.text);
            self.text = text;
            return Some(index);
        }

        let mut free = self.free_text();
        let mut at = cursor.min(free.len());
        // Host UIs may track cursors in chars or UTF-16 units; snap a
        // mid-character byte offset back to the nearest boundary.
        while !free.is_char_boundary(at) {
            at -= 1;
        }
        free.insert(at, c);
        self.text = annotation::set_free_text(&self.text, &free);
        None
    }

    /// Replace the whole free-text field (textarea-style input).
    pub fn set_free_text(&mut self, new_free_text: &str) {
        self.text = annotation::set_free_text(&self.text, new_free_text);
    }

    /// Flip a task's checkbox.
    pub fn toggle_task(&mut self, index: usize) {
        if let Some(task) = self.content().tasks.get(index) {
            let completed = !task.completed;
            self.text = annotation::set_task_completion(&self.text, index, completed);
        }
    }

    /// Retitle a task, keeping its completion state.
    pub fn set_task_text(&mut self, index: usize, new_text: &str) {
        self.text = annotation::set_task_text(&self.text, index, new_text);
    }
}
