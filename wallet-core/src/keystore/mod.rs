// wallet-core/src/keystore/mod.rs

//! Encrypted Keystore
//!
//! Private keys at rest use the Web3 Secret Storage v3 JSON format (the one
//! go-ethereum, MetaMask exports and most Ethereum tooling read):
//!
//! - **KDF**: scrypt when writing; scrypt or PBKDF2-HMAC-SHA256 when reading
//! - **Cipher**: AES-128-CTR
//! - **MAC**: Keccak-256 over the second half of the derived key and the ciphertext
//!
//! [`HdKeyStore`] binds these to a directory where each key file is named
//! after its address.

pub mod cipher;
pub mod format;
pub mod store;

pub use cipher::{decrypt_key, encrypt_key, ScryptParams};
pub use format::KeystoreFile;
pub use store::{read_keystore_file, HdKeyStore};
