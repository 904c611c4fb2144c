// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Mnemonic Generation**: BIP-39 phrases via [`WalletMnemonic`], entropy pluggable through [`EntropySource`].
//! - **Key Derivation**: BIP-32 secp256k1 derivation via [`KeyDeriver`] / [`Secp256k1Deriver`].
//! - **Derivation Paths**: BIP-44 Ethereum paths via [`DerivationPaths`].

pub mod key_deriver;
pub mod mnemonic;
pub mod paths;

pub use key_deriver::{KeyDeriver, Secp256k1Deriver};
pub use mnemonic::{EntropySource, OsEntropy, WalletMnemonic, WordCount};
pub use paths::DerivationPaths;
