//! CampusNotes Core - duplicate and copyright classification for uploaded notes
//!
//! This crate implements the moderation core behind the CampusNotes admin
//! dashboard: content fingerprinting of uploaded documents, grouping by
//! fingerprint, duplicate/copyright classification, and the explicit
//! verification action. Everything around it (pages, routing, auth screens)
//! is an external collaborator reached through the [`DocumentStore`] and
//! [`PrincipalDirectory`] seams.
//!
//! # Example
//!
//! ```no_run
//! use campusnotes_core::{
//!     load_and_classify, verify_note, MemoryStore, Principal, StaticDirectory,
//! };
//!
//! # async fn example() -> campusnotes_core::Result<()> {
//! let store = MemoryStore::new();
//! let directory = StaticDirectory::new().with_name("u1", "Alice");
//!
//! // Page load: fingerprint, group, classify, persist
//! let records = load_and_classify(&store, &directory).await?;
//!
//! // Admin reviews a record and accepts it
//! let admin = Principal::new("admin-uid", Some("admin@x.com".into()), true);
//! let verified = verify_note(&store, &records[0].id, &admin).await?;
//! assert!(verified.verified);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod directory;
pub mod error;
pub mod fingerprint;
pub mod record;
pub mod store;
pub mod verify;

// Re-export main types for convenience
pub use classifier::{classify, load_and_classify, run_classification, RecordPatch};
pub use directory::{Principal, PrincipalDirectory, StaticDirectory, UNKNOWN_OWNER};
pub use error::{ClassifierError, Result};
pub use fingerprint::{compute_fingerprint, decode_content, sanitize_base64};
pub use record::{NotePatch, NoteRecord};
pub use store::{DocumentStore, MemoryStore, StoreError};
pub use verify::verify_note;
