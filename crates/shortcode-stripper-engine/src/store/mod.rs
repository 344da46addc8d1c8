//! Persistence boundary for documents: an id plus a single text body.

mod fs;
mod memory;

pub use fs::{DEFAULT_INCLUDE, FsDocumentStore};
pub use memory::MemoryDocumentStore;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Opaque document identifier.
///
/// For [`FsDocumentStore`] this is the `/`-separated path relative to the
/// store root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(DocumentId),
    #[error("Invalid documents directory: {0}")]
    InvalidRoot(String),
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid include pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("Write rejected for document: {0}")]
    WriteRejected(DocumentId),
}

/// A collection of documents whose bodies can be read and replaced.
pub trait DocumentStore {
    /// Every document id in the store, in a stable order
    fn list_document_ids(&self) -> Result<Vec<DocumentId>, StoreError>;

    fn get_body(&self, id: &DocumentId) -> Result<String, StoreError>;

    fn set_body(&mut self, id: &DocumentId, body: &str) -> Result<(), StoreError>;
}
