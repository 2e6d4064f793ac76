//! Note record entity and partial-field updates.
//!
//! Field names serialize in camelCase to match the document store schema the
//! dashboard was built against; legacy spellings (`fileEncodedData`,
//! `ownerUId`) are accepted on deserialization via aliases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fingerprint::{decode_text_field, looks_like_base64, sanitize_base64};

/// One uploaded document and its metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteRecord {
    /// Immutable key assigned by the store on creation
    pub id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub file_name: Option<String>,
    /// Base64-encoded binary content, possibly whitespace-contaminated
    #[serde(alias = "fileEncodedData")]
    pub file_data: Option<String>,
    /// Lowercase hex SHA-256 of the decoded content; absent until first computed
    pub fingerprint: Option<String>,
    /// Opaque identifier of the uploading principal
    #[serde(rename = "ownerUid", alias = "ownerUId")]
    pub owner: Option<String>,
    /// Orders records within a fingerprint group; missing sorts as earliest
    pub created_at: Option<DateTime<Utc>>,

    // Classification fields, recomputed on every classifier run
    pub is_duplicate: bool,
    pub duplicate_reason: String,
    pub is_copyrighted: bool,
    pub copyright_reason: String,

    // Verification fields, raised only by the explicit verify action
    pub verified: bool,
    pub is_verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub verified_by: Option<String>,
}

impl NoteRecord {
    /// True when the record carries a usable (non-empty) fingerprint.
    pub fn has_fingerprint(&self) -> bool {
        self.fingerprint.as_deref().is_some_and(|f| !f.is_empty())
    }

    /// Merge a partial update into this record. Only fields present in the
    /// patch change; everything else is left as-is.
    pub fn apply(&mut self, patch: &NotePatch) {
        if let Some(ref fingerprint) = patch.fingerprint {
            self.fingerprint = Some(fingerprint.clone());
        }
        if let Some(is_duplicate) = patch.is_duplicate {
            self.is_duplicate = is_duplicate;
        }
        if let Some(ref duplicate_reason) = patch.duplicate_reason {
            self.duplicate_reason = duplicate_reason.clone();
        }
        if let Some(is_copyrighted) = patch.is_copyrighted {
            self.is_copyrighted = is_copyrighted;
        }
        if let Some(ref copyright_reason) = patch.copyright_reason {
            self.copyright_reason = copyright_reason.clone();
        }
        if let Some(verified) = patch.verified {
            self.verified = verified;
        }
        if let Some(is_verified) = patch.is_verified {
            self.is_verified = is_verified;
        }
        if let Some(verified_at) = patch.verified_at {
            self.verified_at = Some(verified_at);
        }
        if let Some(ref verified_by) = patch.verified_by {
            self.verified_by = Some(verified_by.clone());
        }
    }

    /// Normalize a freshly loaded record the way the dashboard load path does:
    /// backfill `title` from the file name and `author` from the owner id,
    /// best-effort decode base64-encoded text metadata, and strip whitespace
    /// from the encoded content so later decoding sees canonical input.
    pub fn normalized(mut self) -> Self {
        if let Some(ref data) = self.file_data {
            self.file_data = Some(sanitize_base64(data));
        }

        if self.title.as_deref().map_or(true, str::is_empty) {
            if let Some(ref file_name) = self.file_name {
                self.title = Some(file_name.clone());
            }
        }
        if self.author.is_none() {
            self.author = self.owner.clone();
        }

        for field in [
            &mut self.title,
            &mut self.author,
            &mut self.subject,
            &mut self.description,
            &mut self.category,
        ] {
            if let Some(value) = field {
                if looks_like_base64(value) {
                    *value = decode_text_field(value);
                }
            }
        }
        for tag in &mut self.tags {
            if looks_like_base64(tag) {
                *tag = decode_text_field(tag);
            }
        }

        self
    }
}

/// Partial-field update merged into a stored record.
///
/// Mirrors the store's merge-update semantics: only the fields that are
/// `Some` are written, everything else is untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_duplicate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_copyrighted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
}

impl NotePatch {
    /// A patch that only sets the content fingerprint.
    pub fn fingerprint(fingerprint: impl Into<String>) -> Self {
        Self {
            fingerprint: Some(fingerprint.into()),
            ..Self::default()
        }
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.fingerprint.is_none()
            && self.is_duplicate.is_none()
            && self.duplicate_reason.is_none()
            && self.is_copyrighted.is_none()
            && self.copyright_reason.is_none()
            && self.verified.is_none()
            && self.is_verified.is_none()
            && self.verified_at.is_none()
            && self.verified_by.is_none()
    }
}
