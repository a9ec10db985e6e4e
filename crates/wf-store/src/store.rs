//! The storage seam and its error type.

use thiserror::Error;
use wf_core::document::{DocumentError, GraphDocument};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored bytes are not a valid workflow document.
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("no saved workflow named `{0}`")]
    NotFound(String),
}

/// Where saved workflows live.
///
/// Names are opaque identifiers minted by `save` and handed back to
/// `load`; callers never construct them.
pub trait DocumentStore {
    /// The names of every saved workflow, oldest first.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Load a saved workflow by name.
    fn load(&self, name: &str) -> Result<GraphDocument, StoreError>;

    /// Persist a document under a fresh timestamped name, returning it.
    fn save(&self, doc: &GraphDocument) -> Result<String, StoreError>;
}
