//! Solana wallet CLI commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use sprig_core::{ChildWallet, Mnemonic};
use sprig_svm::{
    DerivationStyle, Ed25519, Keypair, Pubkey, TokenConfig, TokenProgram, associated_token_address,
};
use zeroize::Zeroizing;

use super::DeriveArgs;
use crate::output::{self, Header};

/// CLI-compatible derivation style enum.
///
/// Maps to `sprig_svm::DerivationStyle` variants.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CliDerivationStyle {
    /// Standard: m/44'/501'/{index}'/0' (Phantom, Backpack, Solflare)
    #[default]
    #[value(alias = "phantom", alias = "backpack")]
    Standard,

    /// Trust: m/44'/501'/{index}' (Trust Wallet, Ledger, Keystone)
    #[value(alias = "ledger", alias = "keystone")]
    Trust,

    /// Ledger Live: m/44'/501'/{index}'/0'/0'
    LedgerLive,
}

impl From<CliDerivationStyle> for DerivationStyle {
    fn from(style: CliDerivationStyle) -> Self {
        match style {
            CliDerivationStyle::Standard => DerivationStyle::Standard,
            CliDerivationStyle::Trust => DerivationStyle::Trust,
            CliDerivationStyle::LedgerLive => DerivationStyle::LedgerLive,
        }
    }
}

/// Token program choice for `ata`.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CliTokenProgram {
    /// SPL Token: TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA
    #[default]
    Token,
    /// Token-2022: TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb
    #[value(name = "token-2022", alias = "token2022")]
    Token2022,
}

impl From<CliTokenProgram> for TokenProgram {
    fn from(program: CliTokenProgram) -> Self {
        match program {
            CliTokenProgram::Token => TokenProgram::Token,
            CliTokenProgram::Token2022 => TokenProgram::Token2022,
        }
    }
}

/// Solana wallet operations.
#[derive(Args)]
pub struct SolanaCommand {
    #[command(subcommand)]
    command: SolanaSubcommand,
}

#[derive(Subcommand)]
enum SolanaSubcommand {
    /// Generate a new mnemonic and derive accounts from it.
    New {
        /// Number of mnemonic words (12, 15, 18, 21, or 24).
        #[arg(short, long, default_value = "12")]
        words: usize,

        /// Derivation path style for wallet compatibility.
        #[arg(short, long, default_value = "standard")]
        style: CliDerivationStyle,

        #[command(flatten)]
        derive: DeriveArgs,
    },

    /// Derive accounts from an existing mnemonic.
    Import {
        /// BIP39 mnemonic phrase.
        #[arg(short, long)]
        mnemonic: String,

        /// Derivation path style for wallet compatibility.
        #[arg(short, long, default_value = "standard")]
        style: CliDerivationStyle,

        #[command(flatten)]
        derive: DeriveArgs,
    },

    /// Show a keypair file, or create one with --new.
    Keypair {
        /// Path of the JSON keypair file.
        #[arg(short, long)]
        file: PathBuf,

        /// Write a fresh random keypair to the file. Refuses to overwrite.
        #[arg(long)]
        new: bool,

        /// Print the 64-byte base58 secret (Phantom import format).
        #[arg(long)]
        show_secret: bool,

        /// Display a QR code for the address.
        #[arg(long)]
        qr: bool,
    },

    /// Derive an associated token account address offline.
    Ata {
        /// Wallet address owning the token account.
        #[arg(short, long)]
        owner: Pubkey,

        /// Token mint address.
        #[arg(short, long)]
        mint: Pubkey,

        /// Token program that owns the mint.
        #[arg(short, long, default_value = "token")]
        program: CliTokenProgram,
    },

    /// Validate token launch parameters and show the resulting mint amounts.
    Token {
        /// Token name (at most 32 bytes).
        #[arg(short, long)]
        name: String,

        /// Ticker symbol (at most 10 bytes).
        #[arg(short, long)]
        symbol: String,

        /// Metadata URI (https://, http://, ipfs:// or ar://).
        #[arg(short, long, default_value = "")]
        uri: String,

        /// Initial supply in whole tokens.
        #[arg(long)]
        supply: String,

        /// Decimal places of the mint.
        #[arg(short, long, default_value = "9")]
        decimals: String,
    },
}

impl SolanaCommand {
    /// Execute the Solana command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            SolanaSubcommand::New {
                words,
                style,
                derive,
            } => {
                let mnemonic = Mnemonic::generate(words)?;
                derive_and_print(&mnemonic, style.into(), &derive, true)?;
            }
            SolanaSubcommand::Import {
                mnemonic,
                style,
                derive,
            } => {
                let mnemonic = Mnemonic::parse(&mnemonic)?;
                derive_and_print(&mnemonic, style.into(), &derive, false)?;
            }
            SolanaSubcommand::Keypair {
                file,
                new,
                show_secret,
                qr,
            } => {
                let keypair = if new {
                    create_keypair_file(&file)?
                } else {
                    Keypair::read_from_file(&file)?
                };
                print_keypair(&keypair, &file, show_secret, qr);
            }
            SolanaSubcommand::Ata {
                owner,
                mint,
                program,
            } => {
                let program = TokenProgram::from(program);
                let (address, bump) = associated_token_address(&owner, &mint, program)?;
                print_ata(&owner, &mint, program, &address, bump);
            }
            SolanaSubcommand::Token {
                name,
                symbol,
                uri,
                supply,
                decimals,
            } => {
                let config = TokenConfig::from_fields(&name, &symbol, &uri, &supply, &decimals)?;
                print_token(&config);
            }
        }
        Ok(())
    }
}

fn derive_and_print(
    mnemonic: &Mnemonic,
    style: DerivationStyle,
    derive: &DeriveArgs,
    generated: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (template, style_name) = match &derive.template {
        Some(template) => (template.clone(), "Custom"),
        None => (style.template()?, style.name()),
    };

    let mut session = derive.open_session::<Ed25519>(template.clone(), mnemonic)?;
    let wallets = session.derive_many(derive.count)?;

    output::print_header(&Header {
        generated: generated.then_some(mnemonic),
        passphrase_set: !derive.passphrase().is_empty(),
        style: style_name,
        template: &template,
    });
    output::print_wallets(&wallets, derive.show_secret.then_some(keypair_base58), derive.qr);
    Ok(())
}

fn keypair_base58(wallet: &ChildWallet) -> Zeroizing<String> {
    Keypair::from_child(wallet).to_base58_string()
}

fn create_keypair_file(path: &Path) -> Result<Keypair, Box<dyn std::error::Error>> {
    if path.exists() {
        return Err(format!("{} already exists", path.display()).into());
    }
    let keypair = Keypair::generate();
    keypair.write_to_file(path)?;
    Ok(keypair)
}

#[rustfmt::skip]
fn print_keypair(keypair: &Keypair, file: &Path, show_secret: bool, show_qr: bool) {
    let address = keypair.pubkey().to_string();

    println!();
    println!("      {}         {}", "File".cyan().bold(), file.display());
    println!("      {}      {}", "Address".cyan().bold(), address.green());
    if show_secret {
        println!("      {}  {}", "Private Key".cyan().bold(), keypair.to_base58_string().as_str());
    }
    if show_qr {
        crate::qr::print(&address);
    }
    println!();
}

#[rustfmt::skip]
fn print_ata(owner: &Pubkey, mint: &Pubkey, program: TokenProgram, address: &Pubkey, bump: u8) {
    println!();
    println!("      {}        {}", "Owner".cyan().bold(), owner);
    println!("      {}         {}", "Mint".cyan().bold(), mint);
    println!("      {}      {}", "Program".cyan().bold(), program.id().dimmed());
    println!("      {}      {}", "Account".cyan().bold(), address.to_string().green());
    println!("      {}         {}", "Bump".cyan().bold(), bump);
    println!();
}

#[rustfmt::skip]
fn print_token(config: &TokenConfig) {
    println!();
    println!("      {}         {}", "Name".cyan().bold(), config.name());
    println!("      {}       {}", "Symbol".cyan().bold(), config.symbol());
    if !config.uri().is_empty() {
        println!("      {}          {}", "URI".cyan().bold(), config.uri());
    }
    println!("      {}     {}", "Decimals".cyan().bold(), config.decimals());
    println!("      {}       {}", "Supply".cyan().bold(), config.initial_supply());
    println!("      {}   {}", "Base Units".cyan().bold(), config.base_units().to_string().green());
    println!();
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::commands::{Cli, Commands};

    fn parse(args: &[&str]) -> SolanaSubcommand {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Solana(cmd) => cmd.command,
            _ => panic!("not a sol command"),
        }
    }

    #[test]
    fn test_ata_arguments() {
        let SolanaSubcommand::Ata { owner, program, .. } = parse(&[
            "sprig",
            "sol",
            "ata",
            "--owner",
            "9gWuQi3JhYzdjx6EcBeXFc5i9AW5Gzdd1k2H7JKdDfhw",
            "--mint",
            "37iyRf34M8y2pjq7RSE87DTWjx3TpRtJY3BpWrhFCjdv",
            "--program",
            "token-2022",
        ]) else {
            panic!("expected ata");
        };
        assert_eq!(owner.to_string(), "9gWuQi3JhYzdjx6EcBeXFc5i9AW5Gzdd1k2H7JKdDfhw");
        assert_eq!(TokenProgram::from(program), TokenProgram::Token2022);
    }

    #[test]
    fn test_ata_rejects_bad_owner() {
        let result = Cli::try_parse_from([
            "sprig", "sol", "ata", "--owner", "not-base58!", "--mint", "11111111111111111111111111111111",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_keypair_file_created_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.json");

        let created = create_keypair_file(&path).unwrap();
        assert_eq!(Keypair::read_from_file(&path).unwrap(), created);
        assert!(create_keypair_file(&path).is_err());
    }

    #[test]
    fn test_secret_export_matches_child() {
        let mnemonic = Mnemonic::parse(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        )
        .unwrap();
        let SolanaSubcommand::New { derive, .. } = parse(&["sprig", "sol", "new"]) else {
            panic!("expected new");
        };
        let template = DerivationStyle::Standard.template().unwrap();
        let wallet = derive
            .open_session::<Ed25519>(template, &mnemonic)
            .unwrap()
            .derive_child()
            .unwrap();

        let imported = Keypair::from_base58_string(&keypair_base58(&wallet)).unwrap();
        assert_eq!(imported.pubkey().to_string(), wallet.address());
    }

    #[test]
    fn test_token_fields_validated() {
        let SolanaSubcommand::Token { name, symbol, uri, supply, decimals } =
            parse(&["sprig", "sol", "token", "-n", "Sprig", "-s", "SPRG", "--supply", "1000"])
        else {
            panic!("expected token");
        };
        let config = TokenConfig::from_fields(&name, &symbol, &uri, &supply, &decimals).unwrap();
        assert_eq!(config.base_units(), 1_000_000_000_000);

        assert!(TokenConfig::from_fields("Sprig", "SPRG", "", "0", "9").is_err());
    }
}
