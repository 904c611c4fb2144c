// wallet-core/src/prompt.rs
//
// Password input channel for unlocking keystore files

use crate::error::{WalletError, WalletResult};
use dialoguer::Password;
use zeroize::Zeroizing;

/// Source of the password for a given account.
pub trait PasswordPrompt {
    fn read_password(&self, address_hex: &str) -> WalletResult<Zeroizing<String>>;
}

/// Masked input on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn read_password(&self, address_hex: &str) -> WalletResult<Zeroizing<String>> {
        let password = Password::new()
            .with_prompt(format!("Please input password for: {}", address_hex))
            .allow_empty_password(true)
            .interact()
            .map_err(|e| WalletError::Io(format!("failed to read password: {}", e)))?;
        Ok(Zeroizing::new(password))
    }
}

/// Password known up front (piped input, tests).
#[derive(Clone)]
pub struct FixedPassword(Zeroizing<String>);

impl FixedPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(Zeroizing::new(password.into()))
    }
}

impl std::fmt::Debug for FixedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FixedPassword([REDACTED])")
    }
}

impl PasswordPrompt for FixedPassword {
    fn read_password(&self, _address_hex: &str) -> WalletResult<Zeroizing<String>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_password_ignores_address() {
        let prompt = FixedPassword::new("hunter2");
        assert_eq!(prompt.read_password("0xabc").unwrap().as_str(), "hunter2");
        assert_eq!(prompt.read_password("").unwrap().as_str(), "hunter2");
    }

    #[test]
    fn test_fixed_password_debug_redacted() {
        let out = format!("{:?}", FixedPassword::new("hunter2"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let prompt: Box<dyn PasswordPrompt> = Box::new(FixedPassword::new("pw"));
        assert_eq!(prompt.read_password("0x00").unwrap().as_str(), "pw");
    }
}
