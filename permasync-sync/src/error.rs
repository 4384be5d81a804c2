//! Error types for permasync-sync.
//!
//! Each variant maps to one failing phase of the sync state machine so the
//! operator can pick the right recovery action. `Write` is special: it fires
//! after a successful publish, so it carries the already-published reference
//! for reuse on retry.

use thiserror::Error;

use permasync_archive::ArchiveError;
use permasync_core::error::ValidationError;
use permasync_ledger::{QueryError, WriteError};
use permasync_storage::PublishError;

/// A sync run failed. The variant names the phase that failed.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The repository name failed validation; no side effect occurred.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Existing-repository state could not be determined; publishing would
    /// make an unreliable create/update decision, so nothing was attempted.
    #[error("cannot list existing repositories: {0}")]
    Query(#[from] QueryError),

    /// Local archiving failed before any network call; safe to re-run.
    #[error("cannot archive repository: {0}")]
    Archive(#[from] ArchiveError),

    /// The artifact upload failed; nothing was committed, safe to re-run.
    #[error("cannot publish archive: {0}")]
    Publish(#[from] PublishError),

    /// The ledger write failed *after* a successful publish. The artifact
    /// '{reference}' is durable but unreferenced; retry the write with the
    /// same reference instead of re-publishing.
    #[error("ledger write failed after artifact '{reference}' was published: {source}")]
    Write {
        reference: String,
        #[source]
        source: WriteError,
    },
}

impl SyncError {
    /// The state-machine phase this error terminated.
    pub fn phase(&self) -> &'static str {
        match self {
            SyncError::Validation(_) => "validating",
            SyncError::Query(_) => "listing",
            SyncError::Archive(_) => "archiving",
            SyncError::Publish(_) => "publishing",
            SyncError::Write { .. } => "writing",
        }
    }

    /// The orphaned artifact reference, when one exists.
    pub fn published_reference(&self) -> Option<&str> {
        match self {
            SyncError::Write { reference, .. } => Some(reference),
            _ => None,
        }
    }
}
