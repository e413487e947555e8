//! Mnemonic generation and checking.

use clap::Args;
use colored::Colorize;
use sprig_core::Mnemonic;

/// Generate a fresh mnemonic, or check an existing one.
#[derive(Args)]
pub struct MnemonicCommand {
    /// Number of mnemonic words (12, 15, 18, 21, or 24).
    #[arg(short, long, default_value = "12")]
    words: usize,

    /// Validate this phrase instead of generating one.
    #[arg(long, value_name = "PHRASE")]
    check: Option<String>,
}

impl MnemonicCommand {
    /// Execute the mnemonic command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        match self.check {
            Some(phrase) => {
                let mnemonic = Mnemonic::parse(&phrase)?;
                print_check(&mnemonic);
            }
            None => {
                let mnemonic = Mnemonic::generate(self.words)?;
                print_generated(&mnemonic);
            }
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_generated(mnemonic: &Mnemonic) {
    println!();
    println!("      {}        {} words", "Words".cyan().bold(), mnemonic.word_count());
    println!("      {}     {}", "Mnemonic".cyan().bold(), mnemonic.phrase().as_str().green());
    println!();
}

#[rustfmt::skip]
fn print_check(mnemonic: &Mnemonic) {
    println!();
    println!("      {}        {} words", "Words".cyan().bold(), mnemonic.word_count());
    println!("      {}     {}", "Checksum".cyan().bold(), "valid".green());
    println!();
}
