//! 32-byte Solana account addresses.

use core::fmt;
use core::str::FromStr;

use curve25519_dalek::edwards::CompressedEdwardsY;

use crate::{Error, Result};

/// Longest base58 rendering of 32 bytes.
const MAX_BASE58_LEN: usize = 44;

/// A Solana account address: 32 bytes, rendered in base58.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pubkey([u8; 32]);

impl Pubkey {
    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Build from a slice that must be exactly 32 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPubkey`] on any other length.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidPubkey(format!("expected 32 bytes, got {}", bytes.len())))?;
        Ok(Self(bytes))
    }

    /// Raw bytes.
    pub const fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Whether the bytes decompress to an ed25519 point.
    ///
    /// Wallet addresses are on the curve; program-derived addresses never are.
    pub fn is_on_curve(&self) -> bool {
        CompressedEdwardsY(self.0).decompress().is_some()
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Pubkey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({self})")
    }
}

impl FromStr for Pubkey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() > MAX_BASE58_LEN {
            return Err(Error::InvalidPubkey(s.into()));
        }
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| Error::InvalidPubkey(s.into()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidPubkey(s.into()))?;
        Ok(Self(bytes))
    }
}
