// wallet-core/src/chains/evm/address.rs
//
// EVM Address Module
// EIP-55 (Checksum), Keccak-256, secp256k1

use crate::error::{CryptoError, WalletError, WalletResult};
use alloy::primitives::Address;
use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use tiny_keccak::{Hasher, Keccak};
use zeroize::Zeroize;

/// EVM Address Generator
///
/// # Flow:  Private Key (32B) → Public Key (64B) → Keccak256 → Address (20B)
pub struct EvmAddress;

impl EvmAddress {
    // =========================================================================
    // CORE: Public Key → Address
    // =========================================================================

    /// Address of a secp256k1 public key
    ///
    /// # Algorithm (Ethereum Yellow Paper)
    /// 1. uncompressed point (65B), drop the `0x04` prefix → 64B
    /// 2. Keccak-256 → 32B
    /// 3. last 20 bytes
    pub fn from_public_key(public_key: &VerifyingKey) -> Address {
        let encoded = public_key.to_encoded_point(false);
        Address::from(Self::keccak_tail(&encoded.as_bytes()[1..]))
    }

    /// Address controlled by `private_key`
    #[inline]
    pub fn from_signing_key(private_key: &SigningKey) -> Address {
        Self::from_public_key(private_key.verifying_key())
    }

    // =========================================================================
    // RAW PRIVATE KEY BYTES
    // =========================================================================

    /// Derive 20 bytes address from a **borrowed byte slice**.
    ///
    /// # ⚠ Security Note
    /// The caller is responsible for zeroing `priv_key` after this call.
    pub fn derive_bytes_from_slice(priv_key: &[u8]) -> WalletResult<[u8; 20]> {
        let secret_key = SecretKey::from_slice(priv_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })?;

        let encoded = secret_key.public_key().to_encoded_point(false);
        Ok(Self::keccak_tail(&encoded.as_bytes()[1..]))
    }

    /// EIP-55 checksummed address from a **borrowed byte slice**.
    #[inline]
    pub fn derive_from_slice(priv_key: &[u8]) -> WalletResult<String> {
        let bytes = Self::derive_bytes_from_slice(priv_key)?;
        Ok(Address::from(bytes).to_checksum(None))
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// Parse an address in any case, with or without `0x`
    pub fn parse(address: &str) -> WalletResult<Address> {
        let trimmed = address.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex_part.len() != 40 {
            return Err(WalletError::Validation(format!(
                "Invalid Ethereum address '{}': expected 40 hex characters",
                address
            )));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(hex_part, &mut bytes).map_err(|e| {
            WalletError::Validation(format!("Invalid Ethereum address '{}': {}", address, e))
        })?;
        Ok(Address::from(bytes))
    }

    /// Keystore file name for `address`: 40 lowercase hex chars, no `0x`
    #[inline]
    pub fn keystore_file_name(address: &Address) -> String {
        hex::encode(address.as_slice())
    }

    /// 40 hex chars; mixed-case input must also carry a valid EIP-55 checksum
    pub fn is_valid(address: &str) -> bool {
        let hex_part = address.strip_prefix("0x").unwrap_or(address);
        let has_lower = hex_part.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = hex_part.bytes().any(|b| b.is_ascii_uppercase());

        if has_lower && has_upper {
            Address::parse_checksummed(address, None).is_ok()
        } else {
            address.parse::<Address>().is_ok()
        }
    }

    /// Normalize to EIP-55 checksum format
    pub fn to_checksum(address: &str) -> WalletResult<String> {
        Ok(Self::parse(address)?.to_checksum(None))
    }

    /// Case-insensitive comparison through the parsed bytes
    #[inline]
    pub fn equals(addr1: &str, addr2: &str) -> bool {
        match (Self::parse(addr1), Self::parse(addr2)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    fn keccak_tail(pub_key_raw: &[u8]) -> [u8; 20] {
        let mut hasher = Keccak::v256();
        let mut hash = [0u8; 32];
        hasher.update(pub_key_raw);
        hasher.finalize(&mut hash);

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        hash.zeroize();
        address
    }
}

// =============================================================================
// TESTS
// =============================================================================
