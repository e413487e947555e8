//! Error types for mnemonic handling and key derivation.

/// Errors that can occur while deriving keys.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The mnemonic has an unknown word, a bad checksum or a bad length.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(#[from] bip39::Error),

    /// Requested word count is not one of 12, 15, 18, 21 or 24.
    #[error("invalid word count {0}, must be 12, 15, 18, 21, or 24")]
    InvalidWordCount(usize),

    /// The operating system random source could not be read.
    #[error("entropy source unavailable: {0}")]
    EntropySource(#[source] rand_core::Error),

    /// The tree walk produced no usable private key at this path.
    #[error("key derivation failed at {path}: {reason}")]
    Derivation {
        /// Rendered path of the failed node.
        path: String,
        /// Library-provided failure description.
        reason: String,
    },

    /// Derivation kept failing at consecutive indices.
    #[error("key derivation failed {attempts} times in a row, last index {last_index}: {reason}")]
    DerivationExhausted {
        /// Last index attempted before giving up.
        last_index: u32,
        /// Number of consecutive failed indices.
        attempts: u32,
        /// Failure description of the last attempt.
        reason: String,
    },

    /// The non-hardened index space (2^31 values) is used up.
    #[error("child index space exhausted")]
    IndexExhausted,

    /// Malformed derivation path or a path the curve cannot walk.
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    /// Malformed path template.
    #[error("invalid path template: {0}")]
    InvalidTemplate(String),

    /// Session configuration rejected.
    #[error("invalid session config: {0}")]
    InvalidConfig(&'static str),

    /// The session has no root node.
    #[error("session has no root node, open a mnemonic first")]
    NoRoot,
}

impl Error {
    /// Whether the session may skip to the next index after this error.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Derivation { .. })
    }
}

/// A convenient Result type alias for sprig-core operations.
pub type Result<T> = core::result::Result<T, Error>;
