//! # permasync-sync
//!
//! The sync orchestrator: validates the repository name, resolves
//! create-vs-update against the ledger, drives archive → publish → write in
//! strict sequence, and reports the terminal outcome.

pub mod error;
pub mod orchestrator;

pub use error::SyncError;
pub use orchestrator::{run, Archiver, SyncOptions, SyncOutcome, TreeArchiver};
