//! File-backed preference store — one JSON document per named instance.
//!
//! The document is a flat string-to-string map, e.g.
//!
//! ```json
//! {
//!   "bitRate": "medium",
//!   "displayName": "Alice"
//! }
//! ```
//!
//! stored as `<preferences_dir>/<instance>.json`.  Reads go straight to
//! the file; writes take an internal lock so two concurrent `set_item`
//! calls cannot interleave their read-modify-write cycles.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::AppPaths;
use crate::store::{PreferenceStore, ReadOutcome, StoreError};

/// Preference document type: a flat key → value map.
type Document = BTreeMap<String, String>;

/// Persistent [`PreferenceStore`] backed by a JSON file.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl FileStore {
    /// Open the store for the named instance under the platform
    /// preferences directory (`<preferences_dir>/<instance>.json`).
    ///
    /// Nothing is touched on disk until the first `set_item`; a missing
    /// file simply reads as [`ReadOutcome::Empty`].
    pub fn open(instance: &str) -> Self {
        let path = AppPaths::new()
            .preferences_dir
            .join(format!("{instance}.json"));
        Self::at(path)
    }

    /// Open the store at an explicit document path (useful for tests).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The document path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole document.  `Ok(None)` means the file does
    /// not exist yet.
    async fn read_document(&self) -> Result<Option<Document>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let doc: Document = serde_json::from_str(&content)?;
                Ok(Some(doc))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Serialise and write the whole document, creating parent
    /// directories as needed.
    async fn write_document(&self, doc: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FileStore {
    async fn get_item(&self, key: &str) -> ReadOutcome {
        self.read_document()
            .await
            .map(|doc| doc.and_then(|d| d.get(key).cloned()))
            .into()
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut doc = match self.read_document().await {
            Ok(Some(doc)) => doc,
            Ok(None) => Document::new(),
            Err(e) => {
                // An unreadable document cannot be merged into; start over
                // rather than fail every future write.
                log::warn!(
                    "replacing unreadable preference document {}: {e}",
                    self.path.display()
                );
                Document::new()
            }
        };

        doc.insert(key.to_string(), value.to_string());
        self.write_document(&doc).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
