//! The seam between the session engine and curve-specific derivation.

use zeroize::Zeroizing;

use crate::{DerivationPath, Result, Seed};

/// A curve plus address scheme that can walk an HD tree.
///
/// Implementations must be deterministic: the same root and path always
/// produce the same [`DerivedKey`].
pub trait KeyFamily {
    /// Root node built from a seed; owns the master key and chain code.
    type Root;

    /// Short name used in logs, e.g. `"secp256k1"`.
    const NAME: &'static str;

    /// Build the root node from a BIP-39 seed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Derivation`] if the seed yields an unusable
    /// master key.
    fn root(seed: &Seed) -> Result<Self::Root>;

    /// Walk `path` from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Derivation`] when the walk lands on a node
    /// without usable private key material; the session treats that as
    /// retryable. Any other error is terminal.
    fn derive(root: &Self::Root, path: &DerivationPath) -> Result<DerivedKey>;
}

/// Key material produced by a [`KeyFamily`] for one path.
pub struct DerivedKey {
    pub(crate) secret: Zeroizing<[u8; 32]>,
    pub(crate) public_key: Vec<u8>,
    pub(crate) address: String,
}

impl DerivedKey {
    /// Bundle a private key with its public key and rendered address.
    #[must_use]
    pub fn new(secret: Zeroizing<[u8; 32]>, public_key: Vec<u8>, address: String) -> Self {
        Self {
            secret,
            public_key,
            address,
        }
    }
}
