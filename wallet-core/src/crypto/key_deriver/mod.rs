// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine
//
// ┌──────────────────────────────────────────┐
// │  Mnemonic (BIP-39)                       │
// │      │  PBKDF2, empty passphrase         │
// │      ▼                                   │
// │  Seed (64 bytes)                         │
// │      │  HMAC-SHA512 "Bitcoin seed"       │
// │      ▼                                   │
// │  Master XPrv ── path walk ──► leaf key   │
// │                                  │       │
// │                      secp256k1 public key│
// └──────────────────────────────────────────┘

pub mod secp256k1;

pub use secp256k1::Secp256k1Deriver;

use crate::crypto::mnemonic::WalletMnemonic;
use crate::error::WalletResult;
use bip32::DerivationPath;
use k256::ecdsa::{SigningKey, VerifyingKey};

/// Entry point for mnemonic → key derivation.
pub struct KeyDeriver;

impl KeyDeriver {
    /// Derive the private key at `path` from a mnemonic phrase.
    ///
    /// The phrase is checksum-validated before use, and the seed is built
    /// with the empty BIP-39 passphrase.
    pub fn new_key_from_mnemonic(phrase: &str, path: &DerivationPath) -> WalletResult<SigningKey> {
        let mnemonic = WalletMnemonic::from_phrase(phrase)?;
        Self::from_mnemonic(&mnemonic, path)
    }

    /// Same as [`new_key_from_mnemonic`](Self::new_key_from_mnemonic) for an
    /// already validated mnemonic.
    pub fn from_mnemonic(mnemonic: &WalletMnemonic, path: &DerivationPath) -> WalletResult<SigningKey> {
        let seed = mnemonic.to_seed(None)?;
        let master = Secp256k1Deriver::master_key(&seed[..])?;

        tracing::debug!(path = %path, "deriving secp256k1 key");
        Secp256k1Deriver::derive_private_key(path, &master)
    }

    /// Public half of the keypair
    #[inline]
    pub fn derive_public_key(private_key: &SigningKey) -> VerifyingKey {
        *private_key.verifying_key()
    }
}
