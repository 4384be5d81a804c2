//! permasync — publish a repository snapshot to permanent storage and record
//! it on the shared repository index.
//!
//! # Usage
//!
//! ```text
//! permasync --title <name> --wallet <jwk.json> --contract-id <id> \
//!           --ledger-url <url> --storage-url <url> \
//!           [--description <text>] [--path <dir>] [--include <subtree>] \
//!           [--no-gitignore] [--reuse-reference <ref>]
//! ```
//!
//! Every flag falls back to a `PERMASYNC_*` environment variable, so CI hooks
//! can configure a sync without command-line plumbing. Exit code is 0 only
//! when the ledger write was accepted.

mod config;

use std::process::ExitCode;

use clap::Parser;

use permasync_ledger::{HttpLedgerClient, RepoIndex};
use permasync_storage::{HttpStorageClient, Publisher};
use permasync_sync::TreeArchiver;

/// One invocation = one full sync of one repository. No subcommands.
#[derive(Parser, Debug)]
#[command(
    name = "permasync",
    version,
    about = "Sync a repository snapshot to permanent storage and the on-chain index",
    long_about = None,
)]
pub struct Cli {
    /// Repository title; also the ledger record name. [env: PERMASYNC_TITLE]
    #[arg(long)]
    pub title: Option<String>,

    /// Repository description. [env: PERMASYNC_DESCRIPTION]
    #[arg(long)]
    pub description: Option<String>,

    /// Path to the signing wallet JWK file. [env: PERMASYNC_WALLET]
    #[arg(long)]
    pub wallet: Option<std::path::PathBuf>,

    /// Ledger contract id holding the repository index. [env: PERMASYNC_CONTRACT_ID]
    #[arg(long)]
    pub contract_id: Option<String>,

    /// Ledger gateway base URL. [env: PERMASYNC_LEDGER_URL]
    #[arg(long)]
    pub ledger_url: Option<String>,

    /// Storage-network gateway base URL. [env: PERMASYNC_STORAGE_URL]
    #[arg(long)]
    pub storage_url: Option<String>,

    /// Directory to sync from.
    #[arg(long, default_value = ".")]
    pub path: std::path::PathBuf,

    /// Subtree to archive, relative to --path (e.g. `.git` for metadata only).
    #[arg(long, default_value = ".")]
    pub include: std::path::PathBuf,

    /// Archive everything, ignoring the project's .gitignore.
    #[arg(long)]
    pub no_gitignore: bool,

    /// Skip archive + upload and record this already-published reference.
    #[arg(long)]
    pub reuse_reference: Option<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let (sync_config, options) = match config::resolve(cli) {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("[ permasync ] {err:#}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "[ permasync ] starting sync for repo '{}'",
        sync_config.title
    );

    let storage = HttpStorageClient::new(&sync_config.storage_url, sync_config.wallet.address());
    let ledger = HttpLedgerClient::new(
        &sync_config.ledger_url,
        &sync_config.contract_id,
        sync_config.wallet.address(),
    );
    let publisher = Publisher::new(storage);
    let index = RepoIndex::new(ledger);

    match permasync_sync::run(&sync_config, &options, &TreeArchiver, &publisher, &index) {
        Ok(outcome) => {
            println!(
                "[ permasync ] synced '{}': record {} -> {} ({}, write {})",
                sync_config.title, outcome.record_id, outcome.reference, outcome.kind,
                outcome.status
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            // A publish-then-write failure leaves a durable, unreferenced
            // artifact; tell the operator how to finish without paying for a
            // second upload.
            if let Some(reference) = err.published_reference() {
                eprintln!(
                    "[ permasync ] warning: artifact '{reference}' was published but not \
                     recorded; re-run with --reuse-reference {reference} to finish the sync \
                     without re-uploading"
                );
            }
            eprintln!("[ permasync ] sync failed while {}: {err}", err.phase());
            ExitCode::FAILURE
        }
    }
}
