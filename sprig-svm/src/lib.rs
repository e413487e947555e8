//! Solana-family key derivation and address helpers for sprig.
//!
//! - [`Ed25519`] implements [`sprig_core::KeyFamily`] with SLIP-0010
//!   hardened derivation and base58 addresses.
//! - [`Keypair`] reads and writes Solana CLI keypair files.
//! - [`find_program_address`] and [`associated_token_address`] compute
//!   program-derived addresses offline.
//! - [`TokenConfig`] validates token launch parameters.
//!
//! # Usage
//!
//! ```
//! use sprig_core::Mnemonic;
//! use sprig_svm::{DerivationStyle, Keypair};
//!
//! let mnemonic = Mnemonic::parse(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//! )?;
//! let mut session = sprig_svm::session(DerivationStyle::Standard)?;
//! session.open(&mnemonic, "")?;
//!
//! let wallet = session.derive_child()?;
//! assert_eq!(wallet.path().to_string(), "m/44'/501'/0'/0'");
//! assert_eq!(Keypair::from_child(&wallet).pubkey().to_string(), wallet.address());
//! # Ok::<(), sprig_svm::Error>(())
//! ```

#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]
#![forbid(unsafe_code)]

mod derivation_style;
mod deriver;
mod error;
mod keypair;
mod pda;
mod pubkey;
mod slip10;
mod token;

pub use derivation_style::{DerivationStyle, ParseDerivationStyleError, SOLANA_COIN_TYPE};
pub use deriver::{Ed25519, RootNode};
pub use error::{Error, Result};
pub use keypair::Keypair;
pub use pda::{
    ASSOCIATED_TOKEN_PROGRAM_ID, MAX_SEED_LEN, MAX_SEEDS, TokenProgram, associated_token_address,
    create_program_address, find_program_address,
};
pub use pubkey::Pubkey;
pub use token::{
    DEFAULT_DECIMALS, MAX_DECIMALS, MAX_NAME_LEN, MAX_SYMBOL_LEN, MAX_URI_LEN, TokenConfig,
    TokenConfigError,
};

/// A session deriving ed25519 wallets.
pub type Session = sprig_core::Session<Ed25519>;

/// Empty session using `style`.
///
/// # Errors
///
/// Propagates template construction errors.
pub fn session(style: DerivationStyle) -> Result<Session> {
    let template = style.template()?;
    Ok(Session::new(sprig_core::SessionConfig::new(template)))
}
