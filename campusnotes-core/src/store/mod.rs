//! Document store seam.
//!
//! The classifier treats persistence as an external collaborator: a key-value
//! document store with per-document atomicity and nothing stronger. Writes
//! are last-write-wins at the field level; concurrent sweeps from independent
//! sessions may race, which is an accepted weakness of the surrounding
//! system, not something this layer papers over.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::record::{NoteRecord, NotePatch};

/// Errors from the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Referenced key does not exist
    #[error("Document not found")]
    NotFound,

    /// Loading records failed
    #[error("Read error: {0}")]
    Read(String),

    /// Persisting an update failed
    #[error("Write error: {0}")]
    Write(String),
}

/// External document store for note records.
///
/// `update` has merge semantics: the given fields are folded into the
/// existing document and everything else is untouched. `delete` is
/// idempotent from the caller's perspective.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Full scan of the notes collection. No pagination contract.
    async fn list_all(&self) -> Result<Vec<NoteRecord>, StoreError>;

    /// Fetch a single record by key.
    async fn get(&self, id: &str) -> Result<NoteRecord, StoreError>;

    /// Insert a record, assigning a key when the record carries none.
    /// Returns the key under which the record is stored.
    async fn insert(&self, record: NoteRecord) -> Result<String, StoreError>;

    /// Merge the given fields into an existing record.
    async fn update(&self, id: &str, patch: NotePatch) -> Result<(), StoreError>;

    /// Remove a record. Deleting a missing key is a success.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
