//! Error types for permasync-ledger.
//!
//! Queries and writes fail differently on purpose: a failed query means the
//! caller's view of existing records is *unknown* (not empty), while a failed
//! write after a successful publish leaves an orphaned artifact the caller
//! must be able to report and reuse.

use thiserror::Error;

/// A read-only ledger query failed. Callers must treat this as "state
/// unknown" and must not fall back to assuming no records exist.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Transport-level failure reaching the ledger gateway.
    #[error("ledger gateway unreachable: {0}")]
    Transport(String),

    /// The ledger evaluated the query and rejected it.
    #[error("ledger rejected query: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The gateway response could not be decoded into records.
    #[error("unexpected ledger response: {0}")]
    BadResponse(String),
}

/// A ledger state-transition submission failed.
#[derive(Debug, Error)]
pub enum WriteError {
    /// A required field was empty before submission; nothing was sent.
    #[error("cannot submit ledger write: missing {field}")]
    MissingField { field: &'static str },

    /// Transport-level failure reaching the ledger gateway.
    #[error("ledger gateway unreachable: {0}")]
    Transport(String),

    /// The ledger rejected the transition (name collision, bad credential,
    /// unknown record id, ...).
    #[error("ledger rejected write: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The gateway response could not be decoded into a receipt.
    #[error("unexpected ledger response: {0}")]
    BadResponse(String),
}
