//! Filesystem-backed document store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use wf_core::document::GraphDocument;

use crate::store::{DocumentStore, StoreError};

/// Stores each workflow as `workflow-{unix millis}.json` in one directory.
///
/// The directory is created lazily on first save; listing a directory that
/// doesn't exist yet is an empty store, not an error.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl DocumentStore for FileStore {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match path.file_name().and_then(|n| n.to_str()) {
                    Some(name) => names.push(name.to_string()),
                    None => log::warn!("skipping non-UTF-8 entry in {}", self.dir.display()),
                }
            }
        }
        // Timestamped names sort oldest-first lexicographically
        names.sort();
        Ok(names)
    }

    fn load(&self, name: &str) -> Result<GraphDocument, StoreError> {
        let json = fs::read_to_string(self.path_for(name)).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(name.to_string())
            } else {
                StoreError::Io(e)
            }
        })?;
        Ok(GraphDocument::from_json(&json)?)
    }

    fn save(&self, doc: &GraphDocument) -> Result<String, StoreError> {
        fs::create_dir_all(&self.dir)?;
        let name = format!("workflow-{}.json", Utc::now().timestamp_millis());
        fs::write(self.path_for(&name), doc.to_json()?)?;
        log::debug!("saved workflow {name}");
        Ok(name)
    }
}
