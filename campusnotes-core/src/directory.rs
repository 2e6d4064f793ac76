//! Authentication provider seam.
//!
//! The surrounding application authenticates users; this core only consumes
//! the resulting identity. A [`Principal`] is trusted as-is for `verified_by`
//! and duplicate-reason attribution, with no independent revalidation. The
//! [`PrincipalDirectory`] resolves opaque owner ids to display names for
//! human-readable classification reasons.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Display name used when an owner id cannot be resolved.
pub const UNKNOWN_OWNER: &str = "Unknown";

/// Acting identity supplied by the authentication layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque user id
    pub uid: String,
    /// Email, when the provider exposes one
    pub email: Option<String>,
    /// Admin-membership predicate result from the provider
    pub admin: bool,
}

impl Principal {
    pub fn new(uid: impl Into<String>, email: Option<String>, admin: bool) -> Self {
        Self {
            uid: uid.into(),
            email,
            admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Identity recorded in attributions: email when known, uid otherwise.
    pub fn identity(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.uid)
    }
}

/// Resolves owner ids to display names.
pub trait PrincipalDirectory: Send + Sync {
    fn display_name(&self, owner_id: &str) -> Option<String>;
}

/// Map-backed directory for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    names: HashMap<String, String>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, owner_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(owner_id.into(), name.into());
        self
    }
}

impl PrincipalDirectory for StaticDirectory {
    fn display_name(&self, owner_id: &str) -> Option<String> {
        self.names.get(owner_id).cloned()
    }
}

/// Resolve an owner's display name, falling back to [`UNKNOWN_OWNER`].
pub(crate) fn resolve_display_name(
    directory: &dyn PrincipalDirectory,
    owner: Option<&str>,
) -> String {
    owner
        .and_then(|id| directory.display_name(id))
        .unwrap_or_else(|| UNKNOWN_OWNER.to_string())
}
