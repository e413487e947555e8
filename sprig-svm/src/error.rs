//! Error types for Solana key files and address derivation.

use crate::TokenConfigError;

/// Errors that can occur in Solana-family operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Mnemonic, path or session error from the core engine.
    #[error(transparent)]
    Core(#[from] sprig_core::Error),

    /// Not a base58 encoding of 32 bytes.
    #[error("invalid public key '{0}'")]
    InvalidPubkey(String),

    /// Keypair bytes are malformed or the halves do not match.
    #[error("invalid keypair: {0}")]
    InvalidKeypair(String),

    /// Keypair file could not be read or written.
    #[error("keypair file error: {0}")]
    Io(#[from] std::io::Error),

    /// Keypair file is not a JSON byte array.
    #[error("keypair file is not a JSON byte array: {0}")]
    Json(#[from] serde_json::Error),

    /// More than 16 seeds, or a seed longer than 32 bytes.
    #[error("program address seeds exceed the length limits")]
    MaxSeedLength,

    /// The candidate hash is a valid ed25519 point and cannot be a program address.
    #[error("candidate program address lies on the ed25519 curve")]
    OnCurve,

    /// No bump in 0..=255 produced an off-curve address.
    #[error("no viable bump seed for program address")]
    NoViableBump,

    /// Token launch parameters rejected.
    #[error(transparent)]
    TokenConfig(#[from] TokenConfigError),
}

/// A convenient Result type alias for sprig-svm operations.
pub type Result<T> = core::result::Result<T, Error>;
