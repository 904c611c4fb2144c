// wallet-core/src/keystore/format.rs
//
// Web3 Secret Storage Definition, version 3
// Ref: https://ethereum.org/en/developers/docs/data-structures-and-encoding/web3-secret-storage/

use serde::{Deserialize, Serialize};

pub const KEYSTORE_VERSION: u32 = 3;
pub const CIPHER_AES_128_CTR: &str = "aes-128-ctr";
pub const KDF_SCRYPT: &str = "scrypt";
pub const KDF_PBKDF2: &str = "pbkdf2";
pub const PRF_HMAC_SHA256: &str = "hmac-sha256";

/// One encrypted key, as stored on disk.
///
/// All binary fields are lowercase hex without `0x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreFile {
    /// Owner address; older tools omit it
    #[serde(default)]
    pub address: String,
    // Some exporters capitalise this key
    #[serde(alias = "Crypto")]
    pub crypto: CryptoJson,
    pub id: String,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoJson {
    pub cipher: String,
    pub ciphertext: String,
    pub cipherparams: CipherParams,
    pub kdf: String,
    pub kdfparams: KdfParams,
    /// keccak256(derived_key[16..32] || ciphertext)
    pub mac: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherParams {
    /// 16-byte CTR initial counter
    pub iv: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KdfParams {
    Scrypt(ScryptKdfParams),
    Pbkdf2(Pbkdf2KdfParams),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryptKdfParams {
    pub dklen: u32,
    pub n: u32,
    pub p: u32,
    pub r: u32,
    pub salt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pbkdf2KdfParams {
    pub c: u32,
    pub dklen: u32,
    pub prf: String,
    pub salt: String,
}
