//! wf-editor: the interaction engine for a WireFlow canvas.
//!
//! Turns raw pointer and keyboard events into graph mutations: hit
//! testing, the gesture state machine, snap-assisted connection drawing,
//! inline label editing, keyboard shortcuts, and debounced note autosave.
//! [`EditorSession`] bundles it all around one open document.

pub mod autosave;
pub mod controller;
pub mod hit;
pub mod input;
pub mod note;
pub mod session;
pub mod shortcuts;

pub use autosave::{NoteAutosave, AUTOSAVE_DEBOUNCE};
pub use controller::{ControllerState, DrawingConnection, GraphMutation, InteractionController};
pub use hit::{hit_test, HitTarget, HANDLE_HIT_RADIUS};
pub use input::{InputEvent, Modifiers};
pub use note::NoteEditor;
pub use session::EditorSession;
pub use shortcuts::{ShortcutAction, ShortcutMap};
