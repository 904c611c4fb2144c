//! # hdwallet-core
//!
//! Hierarchical deterministic wallet for Ethereum accounts.
//!
//! ```text
//! 128-bit entropy ─► BIP-39 mnemonic ─► seed ─► BIP-32 m/44'/60'/0'/0/1
//!                                                    │
//!                               secp256k1 key ◄──────┘
//!                                    │
//!                    Keccak-256 ─► address ─► <keystore_dir>/<address hex>
//!                                                (Web3 v3, scrypt + AES-128-CTR)
//! ```
//!
//! The entry point is [`HdWallet`]: create a wallet (the mnemonic is handed
//! to a caller-supplied callback exactly once), store its key under a
//! password, and load it back later by address.

pub mod chains;
pub mod config;
pub mod crypto;
pub mod error;
pub mod keystore;
pub mod prompt;
pub mod wallet;

pub use chains::evm::EvmAddress;
pub use config::WalletConfig;
pub use crypto::{DerivationPaths, EntropySource, KeyDeriver, OsEntropy, WalletMnemonic, WordCount};
pub use error::{CryptoError, KeystoreError, MnemonicError, WalletError, WalletResult};
pub use keystore::{HdKeyStore, KeystoreFile, ScryptParams};
pub use prompt::{FixedPassword, PasswordPrompt, TerminalPrompt};
pub use wallet::{HdWallet, WalletOptions};

pub use alloy::primitives::Address;
