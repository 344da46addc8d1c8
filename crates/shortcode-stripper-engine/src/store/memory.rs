use super::{DocumentId, DocumentStore, StoreError};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory document store with a write log.
///
/// Uses BTreeMap for automatic sorted ordering by id. Every successful
/// `set_body` call is recorded, and writes can be rejected per document to
/// simulate edit conflicts.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: BTreeMap<DocumentId, String>,
    writes: Vec<DocumentId>,
    rejected: BTreeSet<DocumentId>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a single document
    pub fn insert(&mut self, id: impl Into<DocumentId>, body: impl Into<String>) {
        self.documents.insert(id.into(), body.into());
    }

    /// Add multiple documents in a batch
    pub fn extend<I, K, V>(&mut self, documents: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<DocumentId>,
        V: Into<String>,
    {
        for (id, body) in documents {
            self.insert(id, body);
        }
    }

    /// Make every future write to `id` fail
    pub fn reject_writes_for(&mut self, id: impl Into<DocumentId>) {
        self.rejected.insert(id.into());
    }

    pub fn body(&self, id: &str) -> Option<&str> {
        self.documents
            .get(&DocumentId::from(id))
            .map(String::as_str)
    }

    /// Ids of all successful writes, in call order
    pub fn writes(&self) -> &[DocumentId] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn list_document_ids(&self) -> Result<Vec<DocumentId>, StoreError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn get_body(&self, id: &DocumentId) -> Result<String, StoreError> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn set_body(&mut self, id: &DocumentId, body: &str) -> Result<(), StoreError> {
        if self.rejected.contains(id) {
            return Err(StoreError::WriteRejected(id.clone()));
        }
        let Some(existing) = self.documents.get_mut(id) else {
            return Err(StoreError::NotFound(id.clone()));
        };
        *existing = body.to_string();
        self.writes.push(id.clone());
        Ok(())
    }
}
