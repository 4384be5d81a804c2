//! Sync configuration.
//!
//! Everything a sync run needs — title, description, wallet, contract id and
//! gateway endpoints — is assembled once by the caller and passed by
//! reference into each component. Components never read environment
//! variables or global state themselves, so tests can substitute fixtures.

use crate::wallet::Wallet;

/// Immutable configuration for one sync invocation.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Raw repository title; validated by the orchestrator before anything
    /// else runs, and doubles as the ledger record name.
    pub title: String,
    /// Free-form repository description, recorded on the ledger and in tags.
    pub description: String,
    /// Signing wallet; its address is the owner identity for all queries.
    pub wallet: Wallet,
    /// Identifier of the ledger contract holding the repository index.
    pub contract_id: String,
    /// Base URL of the ledger gateway.
    pub ledger_url: String,
    /// Base URL of the storage-network gateway.
    pub storage_url: String,
}
