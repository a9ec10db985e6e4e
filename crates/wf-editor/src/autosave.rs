//! Debounced note autosave.
//!
//! A single cancellable slot: every keystroke (re)schedules the pending
//! write 500ms out, superseding (not queueing) whatever was pending.
//! `poll` hands the write back at most once, when it comes due. Callers
//! pass explicit `Instant`s, which keeps this free of wall-clock reads
//! and directly testable.

use std::time::{Duration, Instant};
use wf_core::NodeId;

/// Quiet period after the last keystroke before the note is written back.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSave {
    node_id: NodeId,
    text: String,
    due: Instant,
}

/// One pending-save slot per editor session.
#[derive(Debug, Default)]
pub struct NoteAutosave {
    pending: Option<PendingSave>,
}

impl NoteAutosave {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `text` to be saved for `node_id` at `now + 500ms`,
    /// superseding any pending save.
    pub fn schedule(&mut self, node_id: NodeId, text: String, now: Instant) {
        self.pending = Some(PendingSave {
            node_id,
            text,
            due: now + AUTOSAVE_DEBOUNCE,
        });
    }

    /// Take the pending write if it has come due.
    pub fn poll(&mut self, now: Instant) -> Option<(NodeId, String)> {
        if self.pending.as_ref().is_some_and(|p| p.due <= now) {
            self.pending.take().map(|p| (p.node_id, p.text))
        } else {
            None
        }
    }

    /// Take the pending write immediately, due or not (note closed).
    pub fn flush(&mut self) -> Option<(NodeId, String)> {
        self.pending.take().map(|p| (p.node_id, p.text))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_the_quiet_period() {
        let mut saver = NoteAutosave::new();
        let t0 = Instant::now();
        let id = NodeId::fresh();

        saver.schedule(id, "draft".into(), t0);
        assert_eq!(saver.poll(t0 + Duration::from_millis(499)), None);
        assert_eq!(
            saver.poll(t0 + Duration::from_millis(500)),
            Some((id, "draft".into()))
        );
        // Delivered exactly once
        assert_eq!(saver.poll(t0 + Duration::from_secs(10)), None);
    }

    #[test]
    fn newer_edit_supersedes_not_queues() {
        let mut saver = NoteAutosave::new();
        let t0 = Instant::now();
        let id = NodeId::fresh();

        saver.schedule(id, "v1".into(), t0);
        saver.schedule(id, "v2".into(), t0 + Duration::from_millis(400));

        // v1's deadline passes without firing; the timer was reset
        assert_eq!(saver.poll(t0 + Duration::from_millis(600)), None);
        assert_eq!(
            saver.poll(t0 + Duration::from_millis(900)),
            Some((id, "v2".into()))
        );
    }

    #[test]
    fn flush_takes_immediately() {
        let mut saver = NoteAutosave::new();
        let id = NodeId::fresh();
        saver.schedule(id, "closing".into(), Instant::now());
        assert_eq!(saver.flush(), Some((id, "closing".into())));
        assert!(!saver.is_pending());
    }
}
