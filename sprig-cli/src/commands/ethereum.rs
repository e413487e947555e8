//! Ethereum wallet CLI commands.

use clap::{Args, Subcommand, ValueEnum};
use sprig_core::{ChildWallet, Mnemonic};
use sprig_evm::{DerivationStyle, ETHEREUM_COIN_TYPE, Secp256k1};
use zeroize::Zeroizing;

use super::DeriveArgs;
use crate::output::{self, Header};

/// Ethereum wallet operations.
#[derive(Args)]
pub struct EthereumCommand {
    #[command(subcommand)]
    command: EthereumSubcommand,
}

/// CLI-compatible derivation style enum.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CliDerivationStyle {
    /// Standard BIP-44 path (MetaMask/Trezor): m/44'/60'/0'/0/{index}
    #[default]
    #[value(alias = "metamask", alias = "trezor")]
    Standard,
    /// Ledger Live path: m/44'/60'/{index}'/0/0
    #[value(name = "ledger-live", alias = "live")]
    LedgerLive,
    /// Ledger Legacy path (MEW/MyCrypto): m/44'/60'/0'/{index}
    #[value(name = "ledger-legacy", alias = "mew")]
    LedgerLegacy,
}

impl From<CliDerivationStyle> for DerivationStyle {
    fn from(style: CliDerivationStyle) -> Self {
        match style {
            CliDerivationStyle::Standard => DerivationStyle::Standard,
            CliDerivationStyle::LedgerLive => DerivationStyle::LedgerLive,
            CliDerivationStyle::LedgerLegacy => DerivationStyle::LedgerLegacy,
        }
    }
}

/// Path selection shared by `new` and `import`.
#[derive(Args, Debug)]
struct PathArgs {
    /// Derivation path style for hardware wallet compatibility.
    #[arg(short, long, default_value = "standard")]
    style: CliDerivationStyle,

    /// SLIP-44 coin type, e.g. 61 for Ethereum Classic.
    #[arg(long, default_value_t = ETHEREUM_COIN_TYPE)]
    coin_type: u32,

    #[command(flatten)]
    derive: DeriveArgs,
}

#[derive(Subcommand)]
enum EthereumSubcommand {
    /// Generate a new mnemonic and derive wallets from it.
    New {
        /// Number of mnemonic words (12, 15, 18, 21, or 24).
        #[arg(short, long, default_value = "12")]
        words: usize,

        #[command(flatten)]
        path: PathArgs,
    },

    /// Derive wallets from an existing mnemonic.
    Import {
        /// BIP39 mnemonic phrase.
        #[arg(short, long)]
        mnemonic: String,

        #[command(flatten)]
        path: PathArgs,
    },
}

impl EthereumCommand {
    /// Execute the Ethereum command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            EthereumSubcommand::New { words, path } => {
                let mnemonic = Mnemonic::generate(words)?;
                derive_and_print(&mnemonic, &path, true)
            }
            EthereumSubcommand::Import { mnemonic, path } => {
                let mnemonic = Mnemonic::parse(&mnemonic)?;
                derive_and_print(&mnemonic, &path, false)
            }
        }
    }
}

fn derive_and_print(
    mnemonic: &Mnemonic,
    path: &PathArgs,
    generated: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let style = DerivationStyle::from(path.style);
    let (template, style_name) = match &path.derive.template {
        Some(template) => (template.clone(), "Custom"),
        None => (style.template(path.coin_type)?, style.name()),
    };

    let mut session = path.derive.open_session::<Secp256k1>(template.clone(), mnemonic)?;
    let wallets = session.derive_many(path.derive.count)?;

    output::print_header(&Header {
        generated: generated.then_some(mnemonic),
        passphrase_set: !path.derive.passphrase().is_empty(),
        style: style_name,
        template: &template,
    });
    let secret = path.derive.show_secret.then_some(private_key_hex);
    output::print_wallets(&wallets, secret, path.derive.qr);
    Ok(())
}

fn private_key_hex(wallet: &ChildWallet) -> Zeroizing<String> {
    Zeroizing::new(format!("0x{}", wallet.secret_hex().as_str()))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::commands::{Cli, Commands};

    fn parse(args: &[&str]) -> EthereumSubcommand {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Ethereum(cmd) => cmd.command,
            _ => panic!("not an eth command"),
        }
    }

    #[test]
    fn test_defaults() {
        let EthereumSubcommand::New { words, path } = parse(&["sprig", "eth", "new"]) else {
            panic!("expected new");
        };
        assert_eq!(words, 12);
        assert_eq!(path.coin_type, 60);
        assert_eq!(path.derive.count, 1);
        assert_eq!(path.derive.max_failures, 3);
        assert!(!path.derive.show_secret);
        assert_eq!(path.derive.passphrase(), "");
    }

    #[test]
    fn test_style_aliases() {
        let EthereumSubcommand::Import { path, .. } =
            parse(&["sprig", "eth", "import", "-m", "x", "--style", "live", "--coin-type", "61"])
        else {
            panic!("expected import");
        };
        let style = DerivationStyle::from(path.style);
        assert_eq!(style, DerivationStyle::LedgerLive);
        assert_eq!(style.template(path.coin_type).unwrap().to_string(), "m/44'/61'/{index}'/0/0");
    }

    #[test]
    fn test_private_key_rendering() {
        let mnemonic = Mnemonic::parse(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        )
        .unwrap();
        let EthereumSubcommand::New { path, .. } = parse(&["sprig", "eth", "new", "--show-secret"])
        else {
            panic!("expected new");
        };
        let template = DerivationStyle::Standard.template(ETHEREUM_COIN_TYPE).unwrap();
        let wallet = path
            .derive
            .open_session::<Secp256k1>(template, &mnemonic)
            .unwrap()
            .derive_child()
            .unwrap();

        assert_eq!(
            private_key_hex(&wallet).as_str(),
            "0x1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727"
        );
    }
}
