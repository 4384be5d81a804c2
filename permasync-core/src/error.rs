//! Error types for permasync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Rejections raised while validating user-supplied sync inputs.
///
/// Nothing has touched the network when one of these is returned; the sync
/// must stop without side effects.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The repository name was empty.
    #[error("repository name is empty")]
    EmptyName,

    /// The repository name contained a character outside `[A-Za-z0-9._-]`.
    #[error(
        "repository name '{name}' is invalid: names can only contain ASCII \
         letters, digits and the characters '.', '-' and '_'"
    )]
    InvalidName { name: String },
}

/// Errors from loading or parsing the signing wallet.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Wallet file could not be read.
    #[error("cannot read wallet at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wallet file is not valid JSON.
    #[error("cannot parse wallet at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Wallet JSON is missing the key material needed to derive an address.
    #[error("wallet at {path} has no usable key material (missing 'n' field)")]
    MissingKey { path: PathBuf },
}
