// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation: BIP-32 / BIP-44
//
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki

use crate::error::{CryptoError, WalletError, WalletResult};
use bip32::{ChildNumber, DerivationPath, XPrv};
use k256::ecdsa::SigningKey;
use std::str::FromStr;
use zeroize::Zeroizing;

/// secp256k1 Key Deriver, BIP-32 Standard
///
/// # Security
/// - Returned keys are `SigningKey`s, which zeroize their scalar on drop
/// - Intermediate extended keys are dropped as soon as the walk moves on
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// Parse a textual path (e.g. `"m/44'/60'/0'/0/1"`).
    ///
    /// The bare root `"m"` is rejected: a wallet key always sits below the
    /// master node.
    pub fn parse_path(path: &str) -> WalletResult<DerivationPath> {
        let derivation_path = DerivationPath::from_str(path).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Invalid path '{}': {}",
                path, e
            )))
        })?;

        if derivation_path.iter().next().is_none() {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Invalid path '{}': path has no child indices",
                path
            ))));
        }

        Ok(derivation_path)
    }

    /// BIP-32 master node ("Bitcoin seed" HMAC key, mainnet parameters)
    pub fn master_key(seed: &[u8]) -> WalletResult<XPrv> {
        XPrv::new(seed).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Failed to create master key: {}",
                e
            )))
        })
    }

    /// Walk `path` from `master`, one child index at a time, and return the
    /// leaf as a signing key.
    ///
    /// Stops at the first child step that fails; nothing is retried.
    pub fn derive_private_key(path: &DerivationPath, master: &XPrv) -> WalletResult<SigningKey> {
        let mut child = master.clone();
        for child_num in path.iter() {
            child = child.derive_child(child_num).map_err(|e| {
                WalletError::Crypto(CryptoError::DerivationFailed(format!(
                    "Child derivation failed at index {}: {}",
                    child_num, e
                )))
            })?;
        }

        Self::to_signing_key(&child)
    }

    /// Derive single private key from seed + textual path
    pub fn derive(seed: &[u8], path: &str) -> WalletResult<SigningKey> {
        let derivation_path = Self::parse_path(path)?;
        let master = Self::master_key(seed)?;
        Self::derive_private_key(&derivation_path, &master)
    }

    /// Batch derive: walk to `base_path` once, then fan out over `indices`
    /// (non-hardened).
    ///
    /// Cheaper than N calls to [`derive`](Self::derive) because the
    /// master → base walk happens once.
    pub fn derive_batch(
        seed: &[u8],
        base_path: &str,
        indices: std::ops::Range<u32>,
    ) -> WalletResult<Vec<SigningKey>> {
        let base_derivation = DerivationPath::from_str(base_path).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Invalid base path '{}': {}",
                base_path, e
            )))
        })?;

        let master = Self::master_key(seed)?;
        let mut base_xprv = master;
        for child_num in base_derivation.iter() {
            base_xprv = base_xprv
                .derive_child(child_num)
                .map_err(|e| WalletError::Crypto(CryptoError::DerivationFailed(e.to_string())))?;
        }

        let mut keys = Vec::with_capacity(indices.len());
        for index in indices {
            let child_num = ChildNumber::new(index, false).map_err(|e| {
                WalletError::Crypto(CryptoError::DerivationFailed(format!(
                    "Invalid index {}: {}",
                    index, e
                )))
            })?;

            let child_xprv = base_xprv
                .derive_child(child_num)
                .map_err(|e| WalletError::Crypto(CryptoError::DerivationFailed(e.to_string())))?;

            keys.push(Self::to_signing_key(&child_xprv)?);
        }

        Ok(keys)
    }

    #[inline]
    pub fn is_valid_path(path: &str) -> bool {
        Self::parse_path(path).is_ok()
    }

    // Re-encode the node's scalar into a standalone key, detached from the
    // chain code.
    fn to_signing_key(node: &XPrv) -> WalletResult<SigningKey> {
        let key_bytes: Zeroizing<[u8; 32]> = Zeroizing::new(node.private_key().to_bytes().into());
        SigningKey::from_slice(&key_bytes[..]).map_err(|e| {
            WalletError::Crypto(CryptoError::KeyConversion(format!(
                "Extended key is not a valid ECDSA key: {}",
                e
            )))
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
