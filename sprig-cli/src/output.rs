//! Shared terminal layout for wallet listings.

use colored::Colorize;
use sprig_core::{ChildWallet, Mnemonic, PathTemplate};
use zeroize::Zeroizing;

/// Header printed before derived wallets.
pub struct Header<'a> {
    /// Freshly generated mnemonic; shown exactly once. `None` on import.
    pub generated: Option<&'a Mnemonic>,
    pub passphrase_set: bool,
    pub style: &'a str,
    pub template: &'a PathTemplate,
}

#[rustfmt::skip]
pub fn print_header(header: &Header<'_>) {
    println!();
    if let Some(mnemonic) = header.generated {
        println!("      {}     {}", "Mnemonic".cyan().bold(), mnemonic.phrase().as_str());
    }
    if header.passphrase_set {
        println!("      {}   {}", "Passphrase".cyan().bold(), "(set)".dimmed());
    }
    println!("      {}        {}", "Style".cyan().bold(), header.style.dimmed());
    println!("      {}     {}", "Template".cyan().bold(), header.template.to_string().dimmed());
}

/// Print each wallet's index, path and address; secrets only when rendered by `secret`.
#[rustfmt::skip]
pub fn print_wallets<S>(wallets: &[ChildWallet], secret: Option<S>, show_qr: bool)
where
    S: Fn(&ChildWallet) -> Zeroizing<String>,
{
    for wallet in wallets {
        println!();
        println!("      {}        {}", "Index".cyan().bold(), wallet.index());
        println!("      {}         {}", "Path".cyan().bold(), wallet.path());
        println!("      {}      {}", "Address".cyan().bold(), wallet.address().green());
        if let Some(render) = &secret {
            println!("      {}  {}", "Private Key".cyan().bold(), render(wallet).as_str());
        }
        if show_qr {
            crate::qr::print(wallet.address());
        }
    }
    println!();
}
