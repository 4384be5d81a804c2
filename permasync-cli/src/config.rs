//! Flag/environment resolution into the sync configuration.
//!
//! Flags win over `PERMASYNC_*` environment variables. Everything is resolved
//! here, once; no other part of the program reads the environment.

use anyhow::{Context, Result};
use std::path::PathBuf;

use permasync_core::{SyncConfig, Wallet};
use permasync_sync::SyncOptions;

use crate::Cli;

fn resolve_value(flag: Option<String>, env_key: &str) -> Option<String> {
    flag.or_else(|| std::env::var(env_key).ok())
}

/// Build the immutable [`SyncConfig`] and per-run [`SyncOptions`] from CLI
/// flags and environment fallbacks.
pub fn resolve(cli: Cli) -> Result<(SyncConfig, SyncOptions)> {
    let title = resolve_value(cli.title, "PERMASYNC_TITLE")
        .context("missing repository title: pass --title or set PERMASYNC_TITLE")?;
    let description =
        resolve_value(cli.description, "PERMASYNC_DESCRIPTION").unwrap_or_default();

    let wallet_path = cli
        .wallet
        .or_else(|| std::env::var("PERMASYNC_WALLET").ok().map(PathBuf::from))
        .context("missing wallet path: pass --wallet or set PERMASYNC_WALLET")?;
    let wallet = Wallet::load(&wallet_path)
        .with_context(|| format!("cannot load wallet from {}", wallet_path.display()))?;

    let contract_id = resolve_value(cli.contract_id, "PERMASYNC_CONTRACT_ID")
        .context("missing contract id: pass --contract-id or set PERMASYNC_CONTRACT_ID")?;
    let ledger_url = resolve_value(cli.ledger_url, "PERMASYNC_LEDGER_URL")
        .context("missing ledger gateway URL: pass --ledger-url or set PERMASYNC_LEDGER_URL")?;
    let storage_url = resolve_value(cli.storage_url, "PERMASYNC_STORAGE_URL").context(
        "missing storage gateway URL: pass --storage-url or set PERMASYNC_STORAGE_URL",
    )?;

    let config = SyncConfig {
        title,
        description,
        wallet,
        contract_id,
        ledger_url: trim_trailing_slash(ledger_url),
        storage_url: trim_trailing_slash(storage_url),
    };
    let options = SyncOptions {
        root: cli.path,
        include: cli.include,
        use_ignore_file: !cli.no_gitignore,
        reuse_reference: cli.reuse_reference,
    };
    Ok((config, options))
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
