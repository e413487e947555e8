//! Sprig - derive HD wallets for EVM chains and Solana from one mnemonic.

mod commands;
mod output;
pub mod qr;

use clap::Parser;
use commands::{Cli, Commands};
use log::debug;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    debug!("sprig {}", env!("CARGO_PKG_VERSION"));
    match cli.command {
        Commands::Mnemonic(cmd) => cmd.execute()?,
        Commands::Ethereum(cmd) => cmd.execute()?,
        Commands::Solana(cmd) => cmd.execute()?,
    }
    Ok(())
}
