//! CLI command definitions and implementations.

use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Password};
use hdwallet_core::{
    EvmAddress, HdKeyStore, HdWallet, KeystoreError, OsEntropy, WalletConfig, WalletError,
    WalletMnemonic, WalletOptions,
};
use std::io::BufRead;
use std::path::PathBuf;
use zeroize::Zeroizing;

/// Main CLI.
#[derive(Parser)]
#[command(name = "hdwallet")]
#[command(about = "Ethereum HD wallet: BIP-39 mnemonic, BIP-44 key, Web3 v3 keystore")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = "HDWALLET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keystore directory (overrides the config file)
    #[arg(long, global = true, env = "HDWALLET_KEYSTORE")]
    pub keystore: Option<PathBuf>,

    /// Log level or filter directives
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new wallet and store its key
    New {
        /// Cheaper scrypt parameters for the key file
        #[arg(long)]
        light_kdf: bool,
    },
    /// Restore a wallet from its mnemonic and store its key
    Restore {
        /// Cheaper scrypt parameters for the key file
        #[arg(long)]
        light_kdf: bool,
    },
    /// Unlock a stored wallet
    Load {
        /// Wallet address (any case, `0x` optional)
        address: String,
        /// Read the password from the first line of stdin
        #[arg(long)]
        password_stdin: bool,
    },
    /// Print the keystore file path for an address
    Address {
        /// Wallet address
        address: String,
    },
    /// List stored wallets
    List,
}

impl Cli {
    /// Configuration with command-line overrides applied.
    pub fn resolve_config(&self) -> anyhow::Result<WalletConfig> {
        let path = self.config.clone().unwrap_or_else(WalletConfig::default_path);
        let mut config = WalletConfig::load_from(&path)?;
        if let Some(dir) = &self.keystore {
            config.keystore_dir = dir.clone();
        }
        Ok(config)
    }
}

/// Execute a command.
pub fn execute(cmd: Commands, config: &WalletConfig) -> anyhow::Result<()> {
    match cmd {
        Commands::New { light_kdf } => {
            let options = options_for(config, light_kdf);
            let wallet =
                HdWallet::create_with(&config.keystore_dir, &options, &mut OsEntropy, show_mnemonic)?;
            let password = new_password()?;
            let path = wallet.store_key(&password)?;

            println!("Address: {}", wallet.address_hex());
            println!("Keystore: {}", path.display());
        }

        Commands::Restore { light_kdf } => {
            let phrase = Zeroizing::new(Password::new().with_prompt("Mnemonic").interact()?);
            let options = options_for(config, light_kdf);
            let wallet = HdWallet::from_mnemonic(&phrase, &config.keystore_dir, &options)?;

            if wallet.keystore_path().exists() {
                let overwrite = Confirm::new()
                    .with_prompt(format!("{} already exists. Overwrite?", wallet.address_hex()))
                    .default(false)
                    .interact()?;
                if !overwrite {
                    println!("Restore cancelled");
                    return Ok(());
                }
            }

            let password = new_password()?;
            let path = wallet.store_key(&password)?;
            println!("Address: {}", wallet.address_hex());
            println!("Keystore: {}", path.display());
        }

        Commands::Load { address, password_stdin } => {
            let result = if password_stdin {
                let password = read_stdin_line()?;
                HdWallet::load_with_password(&address, &config.keystore_dir, &password)
            } else {
                HdWallet::load_interactive(&address, &config.keystore_dir)
            };
            let wallet = result.map_err(describe_load_error)?;
            println!("Unlocked {}", wallet.address_hex());
        }

        Commands::Address { address } => {
            let address = EvmAddress::parse(&address)?;
            let keystore = HdKeyStore::without_key(&config.keystore_dir);
            println!("{}", keystore.address_to_keystore_path(&address).display());
        }

        Commands::List => {
            let keystore = HdKeyStore::without_key(&config.keystore_dir);
            let addresses = keystore.addresses()?;
            if addresses.is_empty() {
                eprintln!("No wallets in {}", config.keystore_dir.display());
                eprintln!("Create one with: hdwallet new");
            }
            for address in addresses {
                println!("{}", address.to_checksum(None));
            }
        }
    }

    Ok(())
}

fn options_for(config: &WalletConfig, light_kdf: bool) -> WalletOptions {
    let mut config = config.clone();
    config.light_kdf |= light_kdf;
    WalletOptions::from_config(&config)
}

fn show_mnemonic(mnemonic: &WalletMnemonic) {
    println!("Recovery phrase (write it down, it is shown only once):");
    println!();
    println!("    {}", mnemonic.phrase());
    println!();
}

fn new_password() -> anyhow::Result<Zeroizing<String>> {
    let password = Password::new()
        .with_prompt("Set password")
        .with_confirmation("Confirm password", "Passwords don't match")
        .interact()?;
    Ok(Zeroizing::new(password))
}

fn read_stdin_line() -> anyhow::Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    std::io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}

fn describe_load_error(err: WalletError) -> anyhow::Error {
    match err {
        WalletError::Keystore(KeystoreError::NotFound(path)) => {
            anyhow::anyhow!("no wallet for that address (looked for {})", path.display())
        }
        WalletError::Keystore(KeystoreError::BadPassword) => anyhow::anyhow!("wrong password"),
        other => other.into(),
    }
}
