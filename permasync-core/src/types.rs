//! Domain types for the permasync protocol.
//!
//! `RepoName` is the only place name validation happens; every other type
//! carries already-validated data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// RepoName
// ---------------------------------------------------------------------------

/// A validated repository name.
///
/// Invariant: non-empty and matches `[A-Za-z0-9._-]+`. Construct with
/// [`RepoName::parse`]; the inner string is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoName(String);

impl RepoName {
    /// Validate `raw` against the naming rule and wrap it.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let ok = raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if !ok {
            return Err(ValidationError::InvalidName {
                name: raw.to_owned(),
            });
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison used when matching against ledger records.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Ledger record shapes
// ---------------------------------------------------------------------------

/// One entry from the ledger's `getRepositoriesByOwner` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedRepo {
    pub id: String,
    pub name: String,
}

/// The full ledger-resident record mapping a name to its artifact reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "dataTxId")]
    pub data_reference: String,
}

// ---------------------------------------------------------------------------
// PublishKind
// ---------------------------------------------------------------------------

/// Whether this sync is the first publish of a repository or an incremental
/// update. Decided by the orchestrator from the owner's existing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishKind {
    New,
    Update,
}

impl PublishKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishKind::New => "new",
            PublishKind::Update => "update",
        }
    }
}

impl fmt::Display for PublishKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
