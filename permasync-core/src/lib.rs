//! # permasync-core
//!
//! Domain types and configuration shared by every permasync crate: validated
//! repository names, ledger record shapes, artifact tags, and the wallet /
//! configuration structs that get threaded through the sync pipeline.

pub mod config;
pub mod error;
pub mod tags;
pub mod types;
pub mod wallet;

pub use config::SyncConfig;
pub use error::{ValidationError, WalletError};
pub use tags::{build_tags, Tag};
pub use types::{OwnedRepo, PublishKind, RepoName, RepoRecord};
pub use wallet::Wallet;
