// wallet-core/src/config.rs

//! Wallet configuration.
//!
//! Stored as TOML, by default at `~/.hdwallet/config.toml`.

use crate::crypto::key_deriver::Secp256k1Deriver;
use crate::crypto::paths::DerivationPaths;
use crate::error::{WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".hdwallet";

/// Wallet configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Directory holding one encrypted file per account
    pub keystore_dir: PathBuf,
    /// BIP-32 path used for new and restored wallets
    pub derivation_path: String,
    /// Cheaper scrypt parameters (n = 2^12, p = 6) for new key files
    pub light_kdf: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            keystore_dir: app_dir().join("keystore"),
            derivation_path: DerivationPaths::EVM_DEFAULT.to_string(),
            light_kdf: false,
        }
    }
}

impl WalletConfig {
    /// Default configuration file path.
    pub fn default_path() -> PathBuf {
        app_dir().join("config.toml")
    }

    /// Load configuration from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> WalletResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| WalletError::Io(format!("{}: {}", path.display(), e)))?;
        let config: WalletConfig = toml::from_str(&contents).map_err(|e| {
            WalletError::Validation(format!("invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> WalletResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| WalletError::Validation(format!("cannot serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> WalletResult<()> {
        Secp256k1Deriver::parse_path(&self.derivation_path)?;
        Ok(())
    }
}

fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
