//! The operations this crate needs from the external ledger runtime.
//!
//! The ledger executes contract functions; this crate only ever calls two of
//! them through a [`LedgerClient`]: a read-only state view and a durable
//! state-transition submission.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{QueryError, WriteError};

/// A read-only contract evaluation against current ledger state.
#[derive(Debug, Clone, Serialize)]
pub struct ViewRequest {
    pub function: String,
    pub payload: Value,
}

/// A state-transition submission. Durably ordered by the ledger once
/// accepted; acceptance does not imply finalization.
#[derive(Debug, Clone, Serialize)]
pub struct WriteRequest {
    pub function: String,
    pub payload: Value,
}

/// How far a write submission has progressed when the call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Accepted by the gateway, ordering/finalization still pending.
    Submitted,
    /// The ledger reports the transition as finalized.
    Finalized,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionStatus::Submitted => f.write_str("submitted"),
            SubmissionStatus::Finalized => f.write_str("finalized"),
        }
    }
}

/// Receipt for an accepted write submission.
#[derive(Debug, Clone, Deserialize)]
pub struct WriteReceipt {
    /// Gateway-assigned identifier of the submitted interaction.
    pub interaction_id: String,
    pub status: SubmissionStatus,
}

/// Client for one ledger contract, scoped to a signing identity.
pub trait LedgerClient {
    /// Evaluate a read-only query against current contract state.
    fn view_state(&self, request: &ViewRequest) -> Result<Value, QueryError>;

    /// Submit a state-transition request. Returns once the submission is
    /// accepted; the receipt says whether it is merely submitted or already
    /// finalized. Never claims success before acceptance.
    fn write_interaction(&self, request: &WriteRequest) -> Result<WriteReceipt, WriteError>;
}
