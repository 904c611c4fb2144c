// wallet-core/src/keystore/cipher.rs
//
// Keystore encryption: scrypt (or PBKDF2 on read) → AES-128-CTR → Keccak-256 MAC

use super::format::{
    CipherParams, CryptoJson, KdfParams, KeystoreFile, ScryptKdfParams, CIPHER_AES_128_CTR,
    KDF_PBKDF2, KDF_SCRYPT, KEYSTORE_VERSION, PRF_HMAC_SHA256,
};
use crate::chains::evm::EvmAddress;
use crate::error::{KeystoreError, WalletError, WalletResult};
use ctr::cipher::{KeyIvInit, StreamCipher};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::subtle::ConstantTimeEq;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tiny_keccak::{Hasher, Keccak};
use zeroize::Zeroizing;

type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;

const DKLEN: usize = 32;
const SALT_LEN: usize = 32;
const IV_LEN: usize = 16;

// Upper bounds on KDF cost read from a file; standard scrypt is log_n 18, r*p 8.
const MAX_SCRYPT_LOG_N: u32 = 20;
const MAX_SCRYPT_R_P: u64 = 256;
const MAX_SCRYPT_MEMORY: u64 = 1 << 30;
const MAX_PBKDF2_ROUNDS: u32 = 10_000_000;

/// scrypt cost parameters used when writing a keystore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryptParams {
    /// log2(N)
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl ScryptParams {
    /// N = 2^18, r = 8, p = 1 (~256 MB, about a second per unlock)
    pub const fn standard() -> Self {
        Self { log_n: 18, r: 8, p: 1 }
    }

    /// N = 2^12, r = 8, p = 6 (~4 MB), for constrained devices
    pub const fn light() -> Self {
        Self { log_n: 12, r: 8, p: 6 }
    }

    #[inline]
    pub fn n(&self) -> u32 {
        1u32 << self.log_n
    }
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self::standard()
    }
}

/// Encrypt `key` under `password` into a v3 keystore document.
pub fn encrypt_key(
    key: &SigningKey,
    password: &str,
    params: ScryptParams,
) -> WalletResult<KeystoreFile> {
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .and_then(|()| OsRng.try_fill_bytes(&mut iv))
        .map_err(|e| KeystoreError::Encryption(e.to_string()))?;

    let derived = scrypt_derive(password, &salt, params.log_n, params.r, params.p, DKLEN)
        .map_err(KeystoreError::Encryption)?;

    let mut ciphertext = Zeroizing::new(key.to_bytes().to_vec());
    apply_aes_ctr(&derived[..16], &iv, &mut ciphertext).map_err(KeystoreError::Encryption)?;
    let mac = compute_mac(&derived, &ciphertext);

    Ok(KeystoreFile {
        address: EvmAddress::keystore_file_name(&EvmAddress::from_signing_key(key)),
        crypto: CryptoJson {
            cipher: CIPHER_AES_128_CTR.to_string(),
            ciphertext: hex::encode(&*ciphertext),
            cipherparams: CipherParams {
                iv: hex::encode(iv),
            },
            kdf: KDF_SCRYPT.to_string(),
            kdfparams: KdfParams::Scrypt(ScryptKdfParams {
                dklen: DKLEN as u32,
                n: params.n(),
                p: params.p,
                r: params.r,
                salt: hex::encode(salt),
            }),
            mac: hex::encode(mac),
        },
        id: uuid::Uuid::new_v4().to_string(),
        version: KEYSTORE_VERSION,
    })
}

/// Decrypt a v3 keystore document.
///
/// A MAC mismatch means the password is wrong; anything malformed in the
/// document is reported as corruption.
pub fn decrypt_key(file: &KeystoreFile, password: &str) -> WalletResult<SigningKey> {
    if file.version != KEYSTORE_VERSION {
        return Err(corrupt(format!("unsupported version {}", file.version)));
    }
    let crypto = &file.crypto;
    if crypto.cipher != CIPHER_AES_128_CTR {
        return Err(corrupt(format!("unsupported cipher '{}'", crypto.cipher)));
    }

    let derived = derive_key(crypto, password)?;

    let ciphertext = decode_hex("ciphertext", &crypto.ciphertext)?;
    let mac = decode_hex("mac", &crypto.mac)?;
    if !bool::from(compute_mac(&derived, &ciphertext)[..].ct_eq(&mac[..])) {
        return Err(KeystoreError::BadPassword.into());
    }

    let iv = decode_hex("iv", &crypto.cipherparams.iv)?;
    let mut plaintext = Zeroizing::new(ciphertext);
    apply_aes_ctr(&derived[..16], &iv, &mut plaintext).map_err(corrupt)?;

    SigningKey::from_slice(&plaintext).map_err(|e| corrupt(format!("invalid private key: {}", e)))
}

fn derive_key(crypto: &CryptoJson, password: &str) -> WalletResult<Zeroizing<Vec<u8>>> {
    match (crypto.kdf.as_str(), &crypto.kdfparams) {
        (KDF_SCRYPT, KdfParams::Scrypt(params)) => {
            let dklen = check_dklen(params.dklen)?;
            let log_n = check_scrypt_cost(params.n, params.r, params.p)?;
            let salt = decode_hex("salt", &params.salt)?;
            scrypt_derive(password, &salt, log_n, params.r, params.p, dklen).map_err(corrupt)
        }
        (KDF_PBKDF2, KdfParams::Pbkdf2(params)) => {
            let dklen = check_dklen(params.dklen)?;
            if params.prf != PRF_HMAC_SHA256 {
                return Err(corrupt(format!("unsupported PRF '{}'", params.prf)));
            }
            if params.c == 0 || params.c > MAX_PBKDF2_ROUNDS {
                return Err(corrupt(format!("pbkdf2 c={} out of range", params.c)));
            }
            let salt = decode_hex("salt", &params.salt)?;
            let mut derived = Zeroizing::new(vec![0u8; dklen]);
            pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, params.c, &mut derived);
            Ok(derived)
        }
        (kdf, _) => Err(corrupt(format!("unsupported or mismatched KDF '{}'", kdf))),
    }
}

fn scrypt_derive(
    password: &str,
    salt: &[u8],
    log_n: u8,
    r: u32,
    p: u32,
    dklen: usize,
) -> Result<Zeroizing<Vec<u8>>, String> {
    let params = scrypt::Params::new(log_n, r, p, dklen)
        .map_err(|e| format!("invalid scrypt parameters: {}", e))?;
    let mut derived = Zeroizing::new(vec![0u8; dklen]);
    scrypt::scrypt(password.as_bytes(), salt, &params, &mut derived)
        .map_err(|e| format!("scrypt failed: {}", e))?;
    Ok(derived)
}

fn apply_aes_ctr(key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<(), String> {
    let mut cipher =
        Aes128Ctr::new_from_slices(key, iv).map_err(|e| format!("bad AES key or IV: {}", e))?;
    cipher.apply_keystream(buf);
    Ok(())
}

fn compute_mac(derived: &[u8], ciphertext: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut mac = [0u8; 32];
    hasher.update(&derived[16..32]);
    hasher.update(ciphertext);
    hasher.finalize(&mut mac);
    mac
}

/// Validate scrypt cost from a file and return log2(n).
fn check_scrypt_cost(n: u32, r: u32, p: u32) -> WalletResult<u8> {
    if n < 2 || !n.is_power_of_two() {
        return Err(corrupt(format!("scrypt n={} is not a power of two", n)));
    }
    let log_n = n.trailing_zeros();
    if log_n > MAX_SCRYPT_LOG_N {
        return Err(corrupt(format!("scrypt n={} exceeds 2^{}", n, MAX_SCRYPT_LOG_N)));
    }
    if r == 0 || p == 0 || u64::from(r) * u64::from(p) > MAX_SCRYPT_R_P {
        return Err(corrupt(format!("scrypt r={} p={} out of range", r, p)));
    }
    // scrypt works in a 128 * r * n byte buffer
    if 128 * u64::from(r) * u64::from(n) > MAX_SCRYPT_MEMORY {
        return Err(corrupt(format!("scrypt r={} n={} needs too much memory", r, n)));
    }
    Ok(log_n as u8)
}

// MAC needs derived_key[16..32]
fn check_dklen(dklen: u32) -> WalletResult<usize> {
    if !(32..=64).contains(&dklen) {
        return Err(corrupt(format!("unsupported dklen {}", dklen)));
    }
    Ok(dklen as usize)
}

fn decode_hex(field: &str, value: &str) -> WalletResult<Vec<u8>> {
    hex::decode(value.trim_start_matches("0x"))
        .map_err(|e| corrupt(format!("field '{}' is not hex: {}", field, e)))
}

fn corrupt(msg: impl Into<String>) -> WalletError {
    WalletError::Keystore(KeystoreError::Corrupt(msg.into()))
}
