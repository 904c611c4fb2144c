// wallet-core/src/wallet.rs
//
// HD Wallet: one Ethereum account derived from a BIP-39 mnemonic, bound to
// the keystore directory its encrypted key lives in.
//
// create:  entropy → mnemonic → reveal → private key → address → keystore handle
// load:    address → key file → password → decrypt → verify address

use crate::chains::evm::EvmAddress;
use crate::config::WalletConfig;
use crate::crypto::key_deriver::{KeyDeriver, Secp256k1Deriver};
use crate::crypto::mnemonic::{EntropySource, OsEntropy, WalletMnemonic, WordCount};
use crate::crypto::paths::DerivationPaths;
use crate::error::{WalletError, WalletResult};
use crate::keystore::{HdKeyStore, ScryptParams};
use crate::prompt::{PasswordPrompt, TerminalPrompt};
use alloy::primitives::Address;
use k256::ecdsa::SigningKey;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How new and restored wallets derive and protect their key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletOptions {
    pub derivation_path: String,
    pub scrypt: ScryptParams,
}

impl Default for WalletOptions {
    fn default() -> Self {
        Self {
            derivation_path: DerivationPaths::EVM_DEFAULT.to_string(),
            scrypt: ScryptParams::standard(),
        }
    }
}

impl WalletOptions {
    pub fn from_config(config: &WalletConfig) -> Self {
        Self {
            derivation_path: config.derivation_path.clone(),
            scrypt: if config.light_kdf {
                ScryptParams::light()
            } else {
                ScryptParams::standard()
            },
        }
    }
}

/// An Ethereum account and the keystore handle that holds its key.
#[derive(Debug)]
pub struct HdWallet {
    address: Address,
    keystore: HdKeyStore,
}

impl HdWallet {
    // =========================================================================
    // CREATE / RESTORE
    // =========================================================================

    /// Create a wallet from fresh OS entropy with the default options.
    ///
    /// `reveal` receives the new mnemonic exactly once, before anything else
    /// happens; it is the only copy the caller will ever see.
    pub fn create<F>(keystore_dir: impl Into<PathBuf>, reveal: F) -> WalletResult<Self>
    where
        F: FnOnce(&WalletMnemonic),
    {
        Self::create_with(keystore_dir, &WalletOptions::default(), &mut OsEntropy, reveal)
    }

    /// Create a wallet with explicit options and entropy source.
    pub fn create_with<E, F>(
        keystore_dir: impl Into<PathBuf>,
        options: &WalletOptions,
        entropy: &mut E,
        reveal: F,
    ) -> WalletResult<Self>
    where
        E: EntropySource + ?Sized,
        F: FnOnce(&WalletMnemonic),
    {
        let path = Secp256k1Deriver::parse_path(&options.derivation_path)?;
        let mnemonic = WalletMnemonic::generate(WordCount::Twelve, entropy)?;
        reveal(&mnemonic);

        let private_key = KeyDeriver::from_mnemonic(&mnemonic, &path)?;
        let wallet = Self::from_key(keystore_dir.into(), private_key, options.scrypt);

        info!(address = %wallet.address, path = %path, "wallet created");
        Ok(wallet)
    }

    /// Rebuild a wallet from an existing mnemonic phrase.
    pub fn from_mnemonic(
        phrase: &str,
        keystore_dir: impl Into<PathBuf>,
        options: &WalletOptions,
    ) -> WalletResult<Self> {
        let path = Secp256k1Deriver::parse_path(&options.derivation_path)?;
        let private_key = KeyDeriver::new_key_from_mnemonic(phrase, &path)?;
        let wallet = Self::from_key(keystore_dir.into(), private_key, options.scrypt);

        info!(address = %wallet.address, path = %path, "wallet restored");
        Ok(wallet)
    }

    fn from_key(keystore_dir: PathBuf, private_key: SigningKey, scrypt: ScryptParams) -> Self {
        let public_key = KeyDeriver::derive_public_key(&private_key);
        let address = EvmAddress::from_public_key(&public_key);
        let keystore = HdKeyStore::new(keystore_dir, private_key).with_scrypt(scrypt);
        Self { address, keystore }
    }

    // =========================================================================
    // STORE
    // =========================================================================

    /// Encrypt the wallet's key under `password` into the keystore directory.
    ///
    /// The file is named after the address; an existing file for the same
    /// address is replaced.
    pub fn store_key(&self, password: &str) -> WalletResult<PathBuf> {
        if password.is_empty() {
            return Err(WalletError::Validation("password must not be empty".into()));
        }
        let key = self
            .keystore
            .signing_key()
            .ok_or_else(|| WalletError::Validation("wallet has no unlocked key".into()))?;

        let path = self.keystore_path();
        self.keystore.store_key(&path, key, password)?;
        Ok(path)
    }

    // =========================================================================
    // LOAD
    // =========================================================================

    /// Unlock the wallet for `address_hex` stored under `data_dir`, asking
    /// `prompt` for the password.
    pub fn load(
        address_hex: &str,
        data_dir: impl Into<PathBuf>,
        prompt: &dyn PasswordPrompt,
    ) -> WalletResult<Self> {
        let address = EvmAddress::parse(address_hex)?;
        let password = prompt.read_password(&address.to_checksum(None))?;
        Self::unlock(address, data_dir.into(), &password)
    }

    /// [`load`](Self::load) with the password typed on the terminal.
    pub fn load_interactive(address_hex: &str, data_dir: impl Into<PathBuf>) -> WalletResult<Self> {
        Self::load(address_hex, data_dir, &TerminalPrompt)
    }

    /// [`load`](Self::load) with a password supplied by the caller.
    pub fn load_with_password(
        address_hex: &str,
        data_dir: impl Into<PathBuf>,
        password: &str,
    ) -> WalletResult<Self> {
        let address = EvmAddress::parse(address_hex)?;
        Self::unlock(address, data_dir.into(), password)
    }

    fn unlock(address: Address, data_dir: PathBuf, password: &str) -> WalletResult<Self> {
        let mut keystore = HdKeyStore::without_key(data_dir);
        let path = keystore.address_to_keystore_path(&address);

        if let Err(e) = keystore.get_key(&address, &path, password) {
            warn!(address = %address, path = %path.display(), error = %e, "failed to load wallet");
            return Err(e);
        }

        info!(address = %address, "wallet loaded");
        Ok(Self { address, keystore })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    #[inline]
    pub fn address(&self) -> Address {
        self.address
    }

    /// EIP-55 checksummed address
    pub fn address_hex(&self) -> String {
        self.address.to_checksum(None)
    }

    #[inline]
    pub fn keystore(&self) -> &HdKeyStore {
        &self.keystore
    }

    /// Where this wallet's key file lives
    pub fn keystore_path(&self) -> PathBuf {
        self.keystore.address_to_keystore_path(&self.address)
    }

    pub fn keys_dir(&self) -> &Path {
        self.keystore.keys_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CryptoError, KeystoreError, MnemonicError};
    use crate::prompt::FixedPassword;
    use std::cell::Cell;
    use tempfile::TempDir;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon abandon abandon about";
    const ABANDON_ADDRESS_1: &str = "0x6Fac4D18c912343BF86fa7049364Dd4E424Ab9C0";
    const ABANDON_ADDRESS_0: &str = "0x9858EfFD232B4033E47d90003D41EC34EcaEda94";

    struct ZeroEntropy;

    impl EntropySource for ZeroEntropy {
        fn fill_entropy(&mut self, buf: &mut [u8]) -> Result<(), MnemonicError> {
            buf.fill(0);
            Ok(())
        }
    }

    struct BrokenEntropy;

    impl EntropySource for BrokenEntropy {
        fn fill_entropy(&mut self, _buf: &mut [u8]) -> Result<(), MnemonicError> {
            Err(MnemonicError::Entropy("rng unavailable".into()))
        }
    }

    fn fast_options() -> WalletOptions {
        WalletOptions {
            derivation_path: DerivationPaths::EVM_DEFAULT.to_string(),
            scrypt: ScryptParams { log_n: 10, r: 8, p: 1 },
        }
    }

    #[test]
    fn test_create_with_fixed_entropy() {
        let dir = TempDir::new().unwrap();
        let mut revealed = None;
        let wallet = HdWallet::create_with(dir.path(), &fast_options(), &mut ZeroEntropy, |m| {
            revealed = Some(m.phrase().to_string());
        })
        .unwrap();

        assert_eq!(revealed.as_deref(), Some(ABANDON_ABOUT));
        assert_eq!(wallet.address_hex(), ABANDON_ADDRESS_1);
        assert!(wallet.keystore().has_key());
        assert_eq!(wallet.keys_dir(), dir.path());
    }

    #[test]
    fn test_reveal_called_exactly_once() {
        let dir = TempDir::new().unwrap();
        let calls = Cell::new(0);
        HdWallet::create_with(dir.path(), &fast_options(), &mut ZeroEntropy, |_| {
            calls.set(calls.get() + 1)
        })
        .unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_create_with_os_entropy_differs() {
        let dir = TempDir::new().unwrap();
        let a = HdWallet::create(dir.path(), |_| {}).unwrap();
        let b = HdWallet::create(dir.path(), |_| {}).unwrap();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_entropy_failure_surfaces() {
        let dir = TempDir::new().unwrap();
        let err = HdWallet::create_with(dir.path(), &fast_options(), &mut BrokenEntropy, |_| {
            panic!("mnemonic must not be revealed")
        })
        .unwrap_err();
        assert!(matches!(err, WalletError::Mnemonic(MnemonicError::Entropy(_))));
    }

    #[test]
    fn test_bad_derivation_path() {
        let dir = TempDir::new().unwrap();
        let options = WalletOptions {
            derivation_path: "m/44'/garbage".into(),
            ..fast_options()
        };
        let err = HdWallet::from_mnemonic(ABANDON_ABOUT, dir.path(), &options).unwrap_err();
        assert!(matches!(err, WalletError::Crypto(CryptoError::DerivationFailed(_))));
    }

    #[test]
    fn test_from_mnemonic_honours_path() {
        let dir = TempDir::new().unwrap();
        let options = WalletOptions {
            derivation_path: DerivationPaths::EVM_0.into(),
            ..fast_options()
        };
        let wallet = HdWallet::from_mnemonic(ABANDON_ABOUT, dir.path(), &options).unwrap();
        assert_eq!(wallet.address_hex(), ABANDON_ADDRESS_0);
    }

    #[test]
    fn test_from_mnemonic_bad_checksum() {
        let dir = TempDir::new().unwrap();
        let phrase = "abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon abandon";
        let err = HdWallet::from_mnemonic(phrase, dir.path(), &fast_options()).unwrap_err();
        assert_eq!(err, WalletError::Mnemonic(MnemonicError::ChecksumFailed));
    }

    #[test]
    fn test_store_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let wallet = HdWallet::from_mnemonic(ABANDON_ABOUT, dir.path(), &fast_options()).unwrap();
        let path = wallet.store_key("correct horse").unwrap();
        assert_eq!(path, dir.path().join("6fac4d18c912343bf86fa7049364dd4e424ab9c0"));

        let loaded =
            HdWallet::load_with_password(ABANDON_ADDRESS_1, dir.path(), "correct horse").unwrap();
        assert_eq!(loaded.address(), wallet.address());
        assert!(loaded.keystore().has_key());

        let prompted =
            HdWallet::load(ABANDON_ADDRESS_1, dir.path(), &FixedPassword::new("correct horse"))
                .unwrap();
        assert_eq!(prompted.address(), wallet.address());
    }

    #[test]
    fn test_store_rejects_empty_password() {
        let dir = TempDir::new().unwrap();
        let wallet = HdWallet::from_mnemonic(ABANDON_ABOUT, dir.path(), &fast_options()).unwrap();
        assert!(matches!(wallet.store_key(""), Err(WalletError::Validation(_))));
        assert!(!wallet.keystore_path().exists());
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        let wallet = HdWallet::from_mnemonic(ABANDON_ABOUT, dir.path(), &fast_options()).unwrap();
        wallet.store_key("pw").unwrap();

        assert_eq!(
            HdWallet::load_with_password(ABANDON_ADDRESS_1, dir.path(), "nope").unwrap_err(),
            WalletError::Keystore(KeystoreError::BadPassword)
        );
        assert!(matches!(
            HdWallet::load_with_password(ABANDON_ADDRESS_0, dir.path(), "pw"),
            Err(WalletError::Keystore(KeystoreError::NotFound(_)))
        ));
        assert!(matches!(
            HdWallet::load_with_password("not-an-address", dir.path(), "pw"),
            Err(WalletError::Validation(_))
        ));
    }

    #[test]
    fn test_options_from_config() {
        let config = WalletConfig {
            light_kdf: true,
            ..WalletConfig::default()
        };
        let options = WalletOptions::from_config(&config);
        assert_eq!(options.scrypt, ScryptParams::light());
        assert_eq!(options.derivation_path, DerivationPaths::EVM_DEFAULT);
        assert_eq!(WalletOptions::default().scrypt, ScryptParams::standard());
    }
}
