//! In-memory document store.
//!
//! Backs tests and embedded use. Matches the external store's contract:
//! per-document atomicity only, merge-semantics updates, idempotent delete.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::{DocumentStore, StoreError};
use crate::record::{NoteRecord, NotePatch};

/// `DashMap`-backed store for note records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: DashMap<String, NoteRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<NoteRecord>, StoreError> {
        Ok(self.notes.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn get(&self, id: &str) -> Result<NoteRecord, StoreError> {
        self.notes
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, mut record: NoteRecord) -> Result<String, StoreError> {
        if record.id.is_empty() {
            record.id = Uuid::new_v4().to_string();
        }
        let id = record.id.clone();
        self.notes.insert(id.clone(), record);
        Ok(id)
    }

    async fn update(&self, id: &str, patch: NotePatch) -> Result<(), StoreError> {
        match self.notes.get_mut(id) {
            Some(mut entry) => {
                entry.value_mut().apply(&patch);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.notes.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_key_when_missing() {
        let store = MemoryStore::new();
        let id = store.insert(NoteRecord::default()).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(store.get(&id).await.unwrap().id, id);
    }

    #[tokio::test]
    async fn insert_keeps_existing_key() {
        let store = MemoryStore::new();
        let record = NoteRecord {
            id: "n1".into(),
            ..NoteRecord::default()
        };
        assert_eq!(store.insert(record).await.unwrap(), "n1");
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = MemoryStore::new();
        let id = store
            .insert(NoteRecord {
                id: "n1".into(),
                title: Some("Calculus".into()),
                ..NoteRecord::default()
            })
            .await
            .unwrap();

        store
            .update(&id, NotePatch::fingerprint("abc123"))
            .await
            .unwrap();

        let record = store.get(&id).await.unwrap();
        assert_eq!(record.fingerprint.as_deref(), Some("abc123"));
        assert_eq!(record.title.as_deref(), Some("Calculus"));
    }

    #[tokio::test]
    async fn update_missing_key_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update("missing", NotePatch::fingerprint("abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let id = store
            .insert(NoteRecord {
                id: "n1".into(),
                ..NoteRecord::default()
            })
            .await
            .unwrap();

        store.delete(&id).await.unwrap();
        store.delete(&id).await.unwrap();
        assert!(store.is_empty());
    }
}
