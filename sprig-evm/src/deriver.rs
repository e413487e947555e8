//! BIP-32 secp256k1 derivation from a BIP-39 seed.

use core::fmt;

use bip32::{ChildNumber, XPrv};
use k256::ecdsa::SigningKey;
use log::debug;
use sprig_core::{
    ChildWallet, DerivationPath, DerivedKey, Error, KeyFamily, PathTemplate, Result, Seed,
};
use zeroize::Zeroizing;

use crate::address::{public_key_to_address, to_checksum_address};

/// secp256k1 key family producing Ethereum addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1;

/// BIP-32 master node: private key plus chain code.
pub struct RootNode {
    xprv: XPrv,
}

impl RootNode {
    /// Build the master node (`m`) from a seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Derivation`] if HMAC-SHA512 of the seed is not a
    /// valid secp256k1 scalar.
    pub fn from_seed(seed: &Seed) -> Result<Self> {
        let xprv = XPrv::new(seed.as_bytes()).map_err(|e| Error::Derivation {
            path: "m".into(),
            reason: e.to_string(),
        })?;
        debug!("secp256k1 root node created");
        Ok(Self { xprv })
    }

    /// Derive the wallet at `index` of `template`, single attempt.
    ///
    /// # Errors
    ///
    /// See [`sprig_core::derive_child`].
    pub fn derive_child(&self, template: &PathTemplate, index: u32) -> Result<ChildWallet> {
        sprig_core::derive_child::<Secp256k1>(self, template, index)
    }

    /// Walk every step of `path`, hardened or not.
    fn signing_key(&self, path: &DerivationPath) -> Result<SigningKey> {
        let mut node = self.xprv.clone();
        for step in path.indices() {
            node = node
                .derive_child(ChildNumber(step.to_u32()))
                .map_err(|e| Error::Derivation {
                    path: path.to_string(),
                    reason: format!("step {step}: {e}"),
                })?;
        }
        Ok(node.private_key().clone())
    }
}

impl fmt::Debug for RootNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RootNode(secp256k1)")
    }
}

impl KeyFamily for Secp256k1 {
    type Root = RootNode;
    const NAME: &'static str = "secp256k1";

    fn root(seed: &Seed) -> Result<RootNode> {
        RootNode::from_seed(seed)
    }

    fn derive(root: &RootNode, path: &DerivationPath) -> Result<DerivedKey> {
        let signing_key = root.signing_key(path)?;

        let point = signing_key.verifying_key().to_encoded_point(false);
        let public_key: [u8; 65] = point.as_bytes().try_into().map_err(|_| Error::Derivation {
            path: path.to_string(),
            reason: "public key is the point at infinity".into(),
        })?;
        let address = to_checksum_address(&public_key_to_address(&public_key));

        Ok(DerivedKey::new(
            Zeroizing::new(signing_key.to_bytes().into()),
            public_key.to_vec(),
            address,
        ))
    }
}
