// wallet-core/src/keystore/store.rs
//
// HdKeyStore - directory-bound handle over encrypted key files
//
// File name convention: <40 lowercase hex address chars>, no extension.

use super::cipher::{decrypt_key, encrypt_key, ScryptParams};
use super::format::KeystoreFile;
use crate::chains::evm::EvmAddress;
use crate::error::{KeystoreError, WalletError, WalletResult};
use alloy::primitives::Address;
use k256::ecdsa::SigningKey;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Keystore handle bound to one directory.
///
/// Holds at most one decrypted key: the one handed over at wallet creation,
/// or the one unlocked by [`get_key`](Self::get_key).
pub struct HdKeyStore {
    keys_dir: PathBuf,
    key: Option<SigningKey>,
    scrypt: ScryptParams,
}

impl std::fmt::Debug for HdKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HdKeyStore")
            .field("keys_dir", &self.keys_dir)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("scrypt", &self.scrypt)
            .finish()
    }
}

impl HdKeyStore {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    pub fn new(keys_dir: impl Into<PathBuf>, key: SigningKey) -> Self {
        Self {
            keys_dir: keys_dir.into(),
            key: Some(key),
            scrypt: ScryptParams::standard(),
        }
    }

    /// Handle with nothing unlocked yet, used on the load path
    pub fn without_key(keys_dir: impl Into<PathBuf>) -> Self {
        Self {
            keys_dir: keys_dir.into(),
            key: None,
            scrypt: ScryptParams::standard(),
        }
    }

    /// scrypt cost used for files written through this handle
    pub fn with_scrypt(mut self, scrypt: ScryptParams) -> Self {
        self.scrypt = scrypt;
        self
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    #[inline]
    pub fn keys_dir(&self) -> &Path {
        &self.keys_dir
    }

    #[inline]
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// The unlocked key, if any. Never log it.
    #[inline]
    pub fn signing_key(&self) -> Option<&SigningKey> {
        self.key.as_ref()
    }

    #[inline]
    pub fn scrypt(&self) -> ScryptParams {
        self.scrypt
    }

    // =========================================================================
    // PATHS
    // =========================================================================

    /// Resolve `file_name` inside the keystore directory; absolute paths pass
    /// through unchanged.
    pub fn join_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        let file_name = file_name.as_ref();
        if file_name.is_absolute() {
            file_name.to_path_buf()
        } else {
            self.keys_dir.join(file_name)
        }
    }

    /// Where the key for `address` lives. Store and load both go through
    /// this mapping.
    pub fn address_to_keystore_path(&self, address: &Address) -> PathBuf {
        self.join_path(EvmAddress::keystore_file_name(address))
    }

    // =========================================================================
    // STORE / LOAD
    // =========================================================================

    /// Encrypt `key` with `password` and write it to `path`.
    ///
    /// The document goes to a temporary file in the target directory first
    /// and is renamed over `path`, so readers never observe a partial file.
    pub fn store_key(&self, path: &Path, key: &SigningKey, password: &str) -> WalletResult<()> {
        let file = encrypt_key(key, password, self.scrypt)?;
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| KeystoreError::Encryption(format!("serialization failed: {}", e)))?;

        debug!(path = %path.display(), n = self.scrypt.n(), "writing keystore file");
        write_atomic(path, json.as_bytes())?;

        info!(address = %file.address, path = %path.display(), "key stored");
        Ok(())
    }

    /// Store the handle's own key under its address-derived path.
    pub fn store(&self, password: &str) -> WalletResult<PathBuf> {
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| WalletError::Validation("keystore holds no key to store".into()))?;

        let path = self.address_to_keystore_path(&EvmAddress::from_signing_key(key));
        self.store_key(&path, key, password)?;
        Ok(path)
    }

    /// Read and decrypt the key at `path`, checking that it belongs to
    /// `address`. On success the key is kept in this handle.
    pub fn get_key(
        &mut self,
        address: &Address,
        path: &Path,
        password: &str,
    ) -> WalletResult<SigningKey> {
        let file = read_keystore_file(path)?;
        let key = decrypt_key(&file, password)?;

        let actual = EvmAddress::from_signing_key(&key);
        if actual != *address {
            return Err(KeystoreError::Corrupt(format!(
                "key content mismatch: have account {}, want {}",
                actual, address
            ))
            .into());
        }

        self.key = Some(key.clone());
        Ok(key)
    }

    /// Addresses with a key file in this directory.
    ///
    /// Only names following the address convention are listed; a missing
    /// directory is an empty keystore.
    pub fn addresses(&self) -> WalletResult<Vec<Address>> {
        let entries = match fs::read_dir(&self.keys_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(KeystoreError::Io(e.to_string()).into()),
        };

        let mut addresses = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| KeystoreError::Io(e.to_string()))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.len() != 40 || name.bytes().any(|b| b.is_ascii_uppercase()) {
                continue;
            }
            if let Ok(address) = EvmAddress::parse(name) {
                addresses.push(address);
            }
        }
        addresses.sort();
        Ok(addresses)
    }
}

/// Parse a keystore document from disk.
pub fn read_keystore_file(path: &Path) -> WalletResult<KeystoreFile> {
    let json = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => KeystoreError::NotFound(path.to_path_buf()),
        _ => KeystoreError::Io(format!("{}: {}", path.display(), e)),
    })?;

    serde_json::from_str(&json)
        .map_err(|e| KeystoreError::Corrupt(format!("{}: {}", path.display(), e)).into())
}

fn write_atomic(path: &Path, contents: &[u8]) -> WalletResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| KeystoreError::Io(format!("{}: {}", dir.display(), e)))?;

    // tempfile creates the file with mode 0600 on unix
    let mut tmp = tempfile::Builder::new()
        .prefix(".keystore-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| KeystoreError::Io(e.to_string()))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| KeystoreError::Io(e.to_string()))?;
    tmp.persist(path)
        .map_err(|e| KeystoreError::Io(format!("{}: {}", path.display(), e.error)))?;
    Ok(())
}
