//! Ethereum-family key derivation for sprig.
//!
//! Implements [`sprig_core::KeyFamily`] for secp256k1 with BIP-32 tree
//! walks and EIP-55 checksummed addresses. The coin type is a parameter, so
//! the same family serves any EVM chain.
//!
//! # Usage
//!
//! ```
//! use sprig_core::Mnemonic;
//! use sprig_evm::DerivationStyle;
//!
//! let mnemonic = Mnemonic::parse(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//! )?;
//! let mut session = sprig_evm::session(DerivationStyle::Standard)?;
//! session.open(&mnemonic, "")?;
//!
//! let wallet = session.derive_child()?;
//! assert_eq!(wallet.path().to_string(), "m/44'/60'/0'/0/0");
//! assert_eq!(wallet.address(), "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
//! # Ok::<(), sprig_core::Error>(())
//! ```

#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]
#![forbid(unsafe_code)]

mod address;
mod derivation_style;
mod deriver;

pub use address::{public_key_to_address, to_checksum_address};
pub use derivation_style::{DerivationStyle, ETHEREUM_COIN_TYPE, ParseDerivationStyleError};
pub use deriver::{RootNode, Secp256k1};
pub use sprig_core::{Error, Result};

/// A session deriving secp256k1 wallets.
pub type Session = sprig_core::Session<Secp256k1>;

/// Empty session using `style` with the Ethereum coin type.
///
/// # Errors
///
/// Propagates template construction errors.
pub fn session(style: DerivationStyle) -> Result<Session> {
    let template = style.template(ETHEREUM_COIN_TYPE)?;
    Ok(Session::new(sprig_core::SessionConfig::new(template)))
}
