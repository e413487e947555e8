//! Core types for the sprig HD derivation toolkit.
//!
//! This crate turns a BIP-39 mnemonic into a seed and drives a [`Session`]
//! that hands out child wallets along a configurable [`PathTemplate`].
//! Curve-specific work lives behind the [`KeyFamily`] trait, implemented by
//! `sprig-evm` (secp256k1) and `sprig-svm` (ed25519).
//!
//! # Example
//!
//! ```
//! use sprig_core::{Mnemonic, PathTemplate};
//!
//! let mnemonic = Mnemonic::parse(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//! )?;
//! let seed = mnemonic.to_seed("");
//! assert_eq!(seed.as_bytes().len(), 64);
//!
//! let template = PathTemplate::bip44(60)?;
//! assert_eq!(template.path(3)?.to_string(), "m/44'/60'/0'/0/3");
//! # Ok::<(), sprig_core::Error>(())
//! ```

#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]
#![forbid(unsafe_code)]

mod error;
mod family;
mod hdpath;
mod mnemonic;
mod session;

pub use error::{Error, Result};
pub use family::{DerivedKey, KeyFamily};
pub use hdpath::{ChildIndex, DerivationPath, PathTemplate, Segment};
pub use mnemonic::{Mnemonic, Seed, derive_seed, generate_mnemonic};
pub use session::{ChildWallet, Session, SessionConfig, derive_child};
