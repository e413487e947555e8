//! CLI command definitions and handlers.

mod ethereum;
mod mnemonic;
mod solana;

use clap::{Args, Parser, Subcommand};
pub use ethereum::EthereumCommand;
pub use mnemonic::MnemonicCommand;
pub use solana::SolanaCommand;
use sprig_core::{KeyFamily, Mnemonic, PathTemplate, Session, SessionConfig};

/// Sprig - derive HD wallets for EVM chains and Solana from one mnemonic.
#[derive(Parser)]
#[command(name = "sprig")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a BIP-39 mnemonic.
    Mnemonic(MnemonicCommand),

    /// Ethereum and EVM wallet operations.
    #[command(name = "eth", alias = "ethereum")]
    Ethereum(EthereumCommand),

    /// Solana wallet, keypair and token account operations.
    #[command(name = "sol", alias = "solana")]
    Solana(SolanaCommand),
}

/// Options shared by every command that walks an HD tree.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// BIP39 passphrase (optional extra security).
    #[arg(short, long)]
    pub passphrase: Option<String>,

    /// Number of wallets to derive.
    #[arg(short, long, default_value = "1")]
    pub count: u32,

    /// Custom path template with one `{index}` slot, e.g. "m/44'/60'/{index}'/0/0".
    /// Overrides --style.
    #[arg(short, long)]
    pub template: Option<PathTemplate>,

    /// Unusable indices skipped in a row before giving up.
    #[arg(long, default_value = "3")]
    pub max_failures: u32,

    /// Print private keys.
    #[arg(long)]
    pub show_secret: bool,

    /// Display a QR code for each address.
    #[arg(long)]
    pub qr: bool,
}

impl DeriveArgs {
    pub fn passphrase(&self) -> &str {
        self.passphrase.as_deref().unwrap_or("")
    }

    /// Open a session for `mnemonic` on `template`.
    pub fn open_session<F: KeyFamily>(
        &self,
        template: PathTemplate,
        mnemonic: &Mnemonic,
    ) -> Result<Session<F>, Box<dyn std::error::Error>> {
        let config = SessionConfig::new(template).with_max_consecutive_failures(self.max_failures)?;
        let mut session = Session::new(config);
        session.open(mnemonic, self.passphrase())?;
        Ok(session)
    }
}
