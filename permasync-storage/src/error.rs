//! Error types for permasync-storage.

use thiserror::Error;

/// All errors that can arise while publishing an artifact.
///
/// A publish failure is terminal for the current sync attempt: nothing was
/// committed anywhere, so re-running the whole sync is safe.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The archive blob was empty; the storage network would reject it.
    #[error("refusing to publish an empty archive")]
    EmptyBlob,

    /// A mandatory tag was missing from the tag set.
    #[error("tag set is missing the mandatory '{name}' tag")]
    MissingTag { name: &'static str },

    /// The gateway rejected the submission (insufficient funding, malformed
    /// tags, etc.).
    #[error("storage gateway rejected the upload: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Transport-level failure reaching the gateway.
    #[error("storage gateway unreachable: {0}")]
    Transport(String),

    /// The gateway response could not be decoded.
    #[error("unexpected storage gateway response: {0}")]
    BadResponse(String),
}
