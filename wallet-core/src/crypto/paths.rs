// wallet-core/src/crypto/paths.rs
//
// Derivation Paths - BIP-44 paths for Ethereum accounts
// BIP-44 (Purpose), SLIP-44 (Coin Types)

/// SLIP-44 registered coin types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    /// All EVM chains share coin type 60
    pub const ETHEREUM: u32 = 60;
}

/// BIP-44 purpose field
pub const BIP44_PURPOSE: u32 = 44;

/// Pre-built derivation paths for Ethereum accounts
///
/// Layout: `m/44'/60'/account'/change/index`
pub struct DerivationPaths;

impl DerivationPaths {
    /// Path new wallets derive their key at.
    ///
    /// Second address index of the first account; index 0 is left unused.
    pub const EVM_DEFAULT: &'static str = "m/44'/60'/0'/0/1";

    /// First address index, the path MetaMask and most wallets use
    pub const EVM_0: &'static str = "m/44'/60'/0'/0/0";

    /// EVM path with custom address index
    #[inline]
    pub fn evm(index: u32) -> String {
        format!("m/44'/60'/0'/0/{}", index)
    }

    /// EVM path with custom account & index (multi-account)
    #[inline]
    pub fn evm_account(account: u32, index: u32) -> String {
        format!("m/44'/60'/{}'/0/{}", account, index)
    }

    /// Parent of the external address chain, for batch derivation
    #[inline]
    pub fn evm_external_chain(account: u32) -> String {
        format!("m/44'/60'/{}'/0", account)
    }

    /// Custom BIP-44 style path
    ///
    /// # Arguments
    /// * `purpose` - 44 for BIP-44
    /// * `coin_type` - SLIP-44 coin type (see [`coin_type`])
    /// * `account` - hardened account index
    /// * `change` - 0 = external, 1 = internal
    /// * `index` - address index
    #[inline]
    pub fn bip44(purpose: u32, coin_type: u32, account: u32, change: u32, index: u32) -> String {
        format!(
            "m/{}'/{}'/{}'/{}/{}",
            purpose, coin_type, account, change, index
        )
    }
}
