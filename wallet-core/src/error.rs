// wallet-core/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Keystore Error: {0}")]
    Keystore(#[from] KeystoreError),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("IO Error: {0}")]
    Io(String),
}

impl WalletError {
    /// True for failures caused by what the user typed or pointed at
    /// (wrong password, missing keystore file, bad mnemonic).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            WalletError::Keystore(KeystoreError::BadPassword)
                | WalletError::Keystore(KeystoreError::NotFound(_))
                | WalletError::Mnemonic(MnemonicError::InvalidWordCount(_))
                | WalletError::Mnemonic(MnemonicError::UnknownWord(_))
                | WalletError::Mnemonic(MnemonicError::ChecksumFailed)
                | WalletError::Validation(_)
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word '{0}' not found in the BIP39 wordlist.")]
    UnknownWord(String),

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("Entropy source failed: {0}")]
    Entropy(String),

    #[error("BIP39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Key conversion failed: {0}")]
    KeyConversion(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeystoreError {
    #[error("keystore file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("could not decrypt key with given password")]
    BadPassword,

    #[error("corrupt keystore file: {0}")]
    Corrupt(String),

    #[error("keystore encryption failed: {0}")]
    Encryption(String),

    #[error("keystore I/O failed: {0}")]
    Io(String),
}

impl From<std::io::Error> for WalletError {
    fn from(e: std::io::Error) -> Self {
        WalletError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_are_distinct_from_internal_errors() {
        let bad_pass = WalletError::from(KeystoreError::BadPassword);
        let missing = WalletError::from(KeystoreError::NotFound(PathBuf::from("/tmp/x")));
        let derivation =
            WalletError::from(CryptoError::DerivationFailed("index out of range".into()));
        let checksum = WalletError::from(MnemonicError::ChecksumFailed);

        assert!(bad_pass.is_user_error());
        assert!(missing.is_user_error());
        assert!(checksum.is_user_error());
        assert!(!derivation.is_user_error());

        assert_ne!(bad_pass.to_string(), derivation.to_string());
        assert_ne!(missing.to_string(), checksum.to_string());
    }

    #[test]
    fn test_messages() {
        let err = WalletError::from(KeystoreError::BadPassword);
        assert_eq!(
            err.to_string(),
            "Keystore Error: could not decrypt key with given password"
        );

        let err = WalletError::from(KeystoreError::NotFound(PathBuf::from("keys/abc")));
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("keys/abc"));
    }
}
