//! SLIP-0010 Ed25519 key derivation.
//!
//! Reference: <https://github.com/satoshilabs/slips/blob/master/slip-0010.md>

use hmac::{Hmac, Mac};
use sha2::Sha512;
use sprig_core::{ChildIndex, Error, Result};
use zeroize::Zeroizing;

type HmacSha512 = Hmac<Sha512>;

const ED25519_CURVE: &[u8] = b"ed25519 seed";

/// A SLIP-0010 node: private key plus chain code.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) private_key: Zeroizing<[u8; 32]>,
    chain_code: Zeroizing<[u8; 32]>,
}

impl Node {
    /// Master node from a seed.
    pub(crate) fn from_seed(seed: &[u8]) -> Result<Self> {
        Self::from_hmac(ED25519_CURVE, &[seed])
    }

    /// Hardened child at `index` (the hardened bit is added here).
    pub(crate) fn derive_hardened(&self, index: u32) -> Result<Self> {
        let hardened = ChildIndex::hardened(index)?.to_u32();
        Self::from_hmac(
            self.chain_code.as_slice(),
            &[&[0x00], self.private_key.as_slice(), &hardened.to_be_bytes()],
        )
    }

    fn from_hmac(key: &[u8], parts: &[&[u8]]) -> Result<Self> {
        let mut mac = HmacSha512::new_from_slice(key).map_err(|e| Error::Derivation {
            path: "m".into(),
            reason: e.to_string(),
        })?;
        for part in parts {
            mac.update(part);
        }
        let mut output = Zeroizing::new([0u8; 64]);
        output.copy_from_slice(&mac.finalize().into_bytes());

        let mut private_key = Zeroizing::new([0u8; 32]);
        let mut chain_code = Zeroizing::new([0u8; 32]);
        private_key.copy_from_slice(&output[..32]);
        chain_code.copy_from_slice(&output[32..]);

        Ok(Self {
            private_key,
            chain_code,
        })
    }
}
