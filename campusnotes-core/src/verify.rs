//! Explicit verification action.
//!
//! The one path that raises a record's verified state; the classifier sweep
//! is the one path that lowers it.

use chrono::Utc;

use crate::directory::Principal;
use crate::error::{ClassifierError, Result};
use crate::record::{NoteRecord, NotePatch};
use crate::store::DocumentStore;

/// Mark a note as reviewed and accepted by the acting principal.
///
/// Fails with [`ClassifierError::PolicyViolation`], changing nothing, when
/// the record is currently copyright-flagged; the flag has to be cleared by
/// a human action before verification is possible again. A missing key
/// surfaces as a store `NotFound`.
pub async fn verify_note(
    store: &dyn DocumentStore,
    id: &str,
    principal: &Principal,
) -> Result<NoteRecord> {
    let mut record = store.get(id).await?;

    if record.is_copyrighted {
        return Err(ClassifierError::PolicyViolation(format!(
            "note {} is flagged for copyright violation and cannot be verified",
            id
        )));
    }

    let patch = NotePatch {
        verified: Some(true),
        is_verified: Some(true),
        verified_at: Some(Utc::now()),
        verified_by: Some(principal.identity().to_string()),
        ..NotePatch::default()
    };

    store.update(id, patch.clone()).await?;
    record.apply(&patch);

    tracing::info!(id = %id, verified_by = %principal.identity(), "Note verified");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};

    fn admin() -> Principal {
        Principal::new("admin-uid", Some("admin@x.com".into()), true)
    }

    #[tokio::test]
    async fn verify_sets_all_verification_fields() {
        let store = MemoryStore::new();
        let id = store
            .insert(NoteRecord {
                id: "n1".into(),
                ..NoteRecord::default()
            })
            .await
            .unwrap();

        let record = verify_note(&store, &id, &admin()).await.unwrap();

        assert!(record.verified);
        assert!(record.is_verified);
        assert_eq!(record.verified_by.as_deref(), Some("admin@x.com"));
        assert!(record.verified_at.is_some());

        let stored = store.get(&id).await.unwrap();
        assert!(stored.verified);
        assert_eq!(stored.verified_by.as_deref(), Some("admin@x.com"));
    }

    #[tokio::test]
    async fn verify_rejects_copyrighted_record() {
        let store = MemoryStore::new();
        let id = store
            .insert(NoteRecord {
                id: "n1".into(),
                is_copyrighted: true,
                copyright_reason: "Content matches note n0".into(),
                ..NoteRecord::default()
            })
            .await
            .unwrap();

        let err = verify_note(&store, &id, &admin()).await.unwrap_err();
        assert!(matches!(err, ClassifierError::PolicyViolation(_)));

        // No state change
        let stored = store.get(&id).await.unwrap();
        assert!(!stored.verified);
        assert!(!stored.is_verified);
        assert!(stored.verified_at.is_none());
        assert!(stored.verified_by.is_none());
    }

    #[tokio::test]
    async fn verify_missing_record_is_not_found() {
        let store = MemoryStore::new();
        let err = verify_note(&store, "missing", &admin()).await.unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::Store(StoreError::NotFound)
        ));
    }
}
