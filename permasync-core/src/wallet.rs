//! Signing wallet loading and identity derivation.
//!
//! The wallet file is a JWK-style JSON document. The owner address — the
//! identity under which ledger queries and writes are scoped — is the
//! base64url-encoded SHA-256 digest of the key's modulus, which matches how
//! the storage network derives addresses from keys.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::WalletError;

/// A loaded signing wallet.
#[derive(Debug, Clone)]
pub struct Wallet {
    address: String,
    jwk: Value,
}

impl Wallet {
    /// Load a wallet from a JWK JSON file and derive its owner address.
    pub fn load(path: &Path) -> Result<Self, WalletError> {
        let contents = std::fs::read_to_string(path).map_err(|e| WalletError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let jwk: Value = serde_json::from_str(&contents).map_err(|e| WalletError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_jwk(jwk, path)
    }

    fn from_jwk(jwk: Value, path: &Path) -> Result<Self, WalletError> {
        let modulus = jwk
            .get("n")
            .and_then(Value::as_str)
            .ok_or_else(|| WalletError::MissingKey {
                path: PathBuf::from(path),
            })?;
        let raw = URL_SAFE_NO_PAD
            .decode(modulus)
            .map_err(|_| WalletError::MissingKey {
                path: PathBuf::from(path),
            })?;
        let address = URL_SAFE_NO_PAD.encode(Sha256::digest(&raw));
        Ok(Self { address, jwk })
    }

    /// The owner address this wallet signs as.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The raw JWK document, passed through to gateway clients that need it.
    pub fn jwk(&self) -> &Value {
        &self.jwk
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_wallet(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("wallet.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn derives_a_stable_address_from_the_modulus() {
        let dir = TempDir::new().unwrap();
        let path = write_wallet(&dir, r#"{"kty":"RSA","n":"AQAB","e":"AQAB"}"#);
        let a = Wallet::load(&path).unwrap();
        let b = Wallet::load(&path).unwrap();
        assert_eq!(a.address(), b.address());
        assert!(!a.address().is_empty());
    }

    #[test]
    fn different_keys_get_different_addresses() {
        let dir = TempDir::new().unwrap();
        let first = Wallet::load(&write_wallet(&dir, r#"{"n":"AQAB"}"#)).unwrap();
        let path = dir.path().join("other.json");
        std::fs::write(&path, r#"{"n":"AQAC"}"#).unwrap();
        let second = Wallet::load(&path).unwrap();
        assert_ne!(first.address(), second.address());
    }

    #[test]
    fn missing_modulus_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_wallet(&dir, r#"{"kty":"RSA"}"#);
        assert!(matches!(
            Wallet::load(&path),
            Err(WalletError::MissingKey { .. })
        ));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(Wallet::load(&path), Err(WalletError::Io { .. })));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_wallet(&dir, "not json");
        assert!(matches!(
            Wallet::load(&path),
            Err(WalletError::Parse { .. })
        ));
    }
}
