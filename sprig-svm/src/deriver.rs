//! SLIP-0010 ed25519 derivation producing Solana addresses.

use core::fmt;

use ed25519_dalek::SigningKey;
use log::debug;
use sprig_core::{
    ChildWallet, DerivationPath, DerivedKey, Error, KeyFamily, PathTemplate, Result, Seed,
};
use zeroize::Zeroizing;

use crate::slip10::Node;

/// ed25519 key family producing base58 Solana addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519;

/// SLIP-0010 master node for the ed25519 curve.
pub struct RootNode {
    node: Node,
}

impl RootNode {
    /// Build the master node (`m`) from a seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Derivation`] if the HMAC cannot be keyed.
    pub fn from_seed(seed: &Seed) -> Result<Self> {
        let node = Node::from_seed(seed.as_bytes())?;
        debug!("ed25519 root node created");
        Ok(Self { node })
    }

    /// Derive the wallet at `index` of `template`, single attempt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the template has a non-hardened
    /// step, otherwise see [`sprig_core::derive_child`].
    pub fn derive_child(&self, template: &PathTemplate, index: u32) -> Result<ChildWallet> {
        sprig_core::derive_child::<Ed25519>(self, template, index)
    }

    fn walk(&self, path: &DerivationPath) -> Result<Node> {
        if !path.is_fully_hardened() {
            return Err(Error::InvalidPath(format!(
                "{path}: ed25519 derivation supports hardened steps only"
            )));
        }
        path.indices()
            .iter()
            .try_fold(self.node.clone(), |node, step| node.derive_hardened(step.index()))
    }
}

impl fmt::Debug for RootNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RootNode(ed25519)")
    }
}

impl KeyFamily for Ed25519 {
    type Root = RootNode;
    const NAME: &'static str = "ed25519";

    fn root(seed: &Seed) -> Result<RootNode> {
        RootNode::from_seed(seed)
    }

    fn derive(root: &RootNode, path: &DerivationPath) -> Result<DerivedKey> {
        let node = root.walk(path)?;
        let signing_key = SigningKey::from_bytes(&node.private_key);
        let public_key = signing_key.verifying_key().to_bytes();

        Ok(DerivedKey::new(
            Zeroizing::new(signing_key.to_bytes()),
            public_key.to_vec(),
            bs58::encode(public_key).into_string(),
        ))
    }
}
