//! Duplicate and copyright classification.
//!
//! Runs as one sequential pass over a caller-owned snapshot of the notes
//! collection: fingerprint anything missing one, group by fingerprint,
//! classify each group, and push changed fields back to the store. The pure
//! grouping-and-comparison step is exposed as [`classify`], which returns the
//! side-effect list so the sweep (and tests) can apply it explicitly.
//!
//! Per-record failures never abort the sweep: a record whose content fails to
//! decode is skipped this run and retried on the next load, and a failed
//! store write is logged while the in-memory snapshot keeps the locally
//! computed classification. Writes are independent and unordered relative to
//! each other; nothing here depends on another record's write landing first.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::directory::{resolve_display_name, PrincipalDirectory};
use crate::error::Result;
use crate::fingerprint::compute_fingerprint;
use crate::record::{NoteRecord, NotePatch};
use crate::store::DocumentStore;

/// One pending store write produced by [`classify`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPatch {
    /// Key of the record to update
    pub id: String,
    /// Fields that changed
    pub patch: NotePatch,
}

/// Timestamp used for group ordering; a missing timestamp sorts as time zero.
fn group_order_key(record: &NoteRecord) -> DateTime<Utc> {
    record.created_at.unwrap_or(DateTime::UNIX_EPOCH)
}

/// Classify a snapshot of records. Pure: same fingerprints, owners and
/// timestamps always produce the same patches, modulo externally resolved
/// display names.
///
/// Within every group of two or more records sharing a non-empty
/// fingerprint, the earliest-created record is the original (ties keep their
/// scan order via stable sort) and is never flagged. Every other member is a
/// duplicate; members whose owner differs from the original's owner are
/// additionally copyright-flagged and forcibly de-verified. Records outside
/// any such group get `is_duplicate` cleared, with their existing duplicate
/// reason text left untouched.
///
/// Only fields that actually differ from the current record appear in the
/// returned patches, so an already classified snapshot yields no writes.
pub fn classify(records: &[NoteRecord], directory: &dyn PrincipalDirectory) -> Vec<RecordPatch> {
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        if let Some(fp) = record.fingerprint.as_deref() {
            if !fp.is_empty() {
                groups.entry(fp).or_default().push(i);
            }
        }
    }

    // Index of the group original for every record classified as a duplicate.
    let mut duplicate_of: Vec<Option<usize>> = vec![None; records.len()];
    for members in groups.values_mut() {
        if members.len() < 2 {
            continue;
        }
        members.sort_by_key(|&i| group_order_key(&records[i]));
        let original = members[0];
        for &member in &members[1..] {
            duplicate_of[member] = Some(original);
        }
    }

    let mut patches = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let mut patch = NotePatch::default();

        match duplicate_of[i] {
            Some(original_idx) => {
                let original = &records[original_idx];
                let owner_name = resolve_display_name(directory, original.owner.as_deref());

                let duplicate_reason = format!(
                    "Duplicate of note {} (first uploaded by {})",
                    original.id, owner_name
                );
                if !record.is_duplicate {
                    patch.is_duplicate = Some(true);
                }
                if record.duplicate_reason != duplicate_reason {
                    patch.duplicate_reason = Some(duplicate_reason);
                }

                if record.owner != original.owner {
                    let copyright_reason = format!(
                        "Content matches note {} owned by {}; flagged as copyright violation",
                        original.id, owner_name
                    );
                    if !record.is_copyrighted {
                        patch.is_copyrighted = Some(true);
                    }
                    if record.copyright_reason != copyright_reason {
                        patch.copyright_reason = Some(copyright_reason);
                    }
                    // A copyrighted record can never stay verified
                    if record.verified {
                        patch.verified = Some(false);
                    }
                    if record.is_verified {
                        patch.is_verified = Some(false);
                    }
                } else {
                    if record.is_copyrighted {
                        patch.is_copyrighted = Some(false);
                    }
                    if !record.copyright_reason.is_empty() {
                        patch.copyright_reason = Some(String::new());
                    }
                }
            }
            None => {
                if record.is_duplicate {
                    patch.is_duplicate = Some(false);
                }
                if record.is_copyrighted {
                    patch.is_copyrighted = Some(false);
                }
                if !record.copyright_reason.is_empty() {
                    patch.copyright_reason = Some(String::new());
                }
                // duplicate_reason deliberately left untouched
            }
        }

        if !patch.is_empty() {
            patches.push(RecordPatch {
                id: record.id.clone(),
                patch,
            });
        }
    }

    patches
}

/// Run the full classification sweep over a caller-owned snapshot.
///
/// Fingerprints every record that has content but no fingerprint yet,
/// persisting each fingerprint immediately so repeat loads do not re-hash
/// unchanged content. Then classifies the snapshot and writes every changed
/// record back. Returns the updated snapshot.
pub async fn run_classification(
    store: &dyn DocumentStore,
    directory: &dyn PrincipalDirectory,
    mut records: Vec<NoteRecord>,
) -> Result<Vec<NoteRecord>> {
    for record in records.iter_mut() {
        if record.has_fingerprint() {
            continue;
        }
        let fingerprint = match record.file_data.as_deref() {
            Some(encoded) => match compute_fingerprint(encoded) {
                Ok(fingerprint) => fingerprint,
                Err(error) => {
                    tracing::warn!(
                        id = %record.id,
                        error = %error,
                        "Content failed to decode; fingerprint deferred to next run"
                    );
                    continue;
                }
            },
            // No attached content: excluded from grouping entirely
            None => continue,
        };

        if let Err(error) = store
            .update(&record.id, NotePatch::fingerprint(fingerprint.clone()))
            .await
        {
            tracing::warn!(
                id = %record.id,
                error = %error,
                "Failed to persist fingerprint"
            );
        }
        record.fingerprint = Some(fingerprint);
    }

    let index: HashMap<String, usize> = records
        .iter()
        .enumerate()
        .map(|(i, record)| (record.id.clone(), i))
        .collect();

    let patches = classify(&records, directory);
    tracing::debug!(
        total = records.len(),
        changed = patches.len(),
        "Classification sweep computed"
    );

    for RecordPatch { id, patch } in patches {
        // The snapshot reflects the computed classification even when the
        // store write fails; the next load retries the write.
        if let Some(&i) = index.get(&id) {
            records[i].apply(&patch);
        }
        if let Err(error) = store.update(&id, patch).await {
            tracing::warn!(id = %id, error = %error, "Failed to persist classification");
        }
    }

    Ok(records)
}

/// Load the full collection, normalize each record, and run the sweep.
///
/// This is the page-load entry point: a load failure surfaces directly with
/// no partial state.
pub async fn load_and_classify(
    store: &dyn DocumentStore,
    directory: &dyn PrincipalDirectory,
) -> Result<Vec<NoteRecord>> {
    let records = store
        .list_all()
        .await?
        .into_iter()
        .map(NoteRecord::normalized)
        .collect();
    run_classification(store, directory, records).await
}
