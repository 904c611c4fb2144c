// wallet-core/src/chains/evm/mod.rs

//! Ethereum Virtual Machine (EVM) Chain Support
//!
//! - **Address Derivation**: Keccak-256 addresses, EIP-55 formatting and the
//!   keystore file-name convention via [`EvmAddress`].

pub mod address;

pub use address::EvmAddress;
