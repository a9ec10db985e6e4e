//! wf-store: saved-workflow storage.
//!
//! A workflow document is saved as one pretty-printed JSON file named
//! `workflow-{millis}.json`. [`DocumentStore`] is the seam: the editor
//! talks to the trait, [`FileStore`] is the on-disk implementation, and
//! tests can substitute their own.

mod file_store;
mod store;

pub use file_store::FileStore;
pub use store::{DocumentStore, StoreError};
