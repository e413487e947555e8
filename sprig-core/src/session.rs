//! Session-scoped HD derivation engine.
//!
//! A [`Session`] owns a root node and a monotonically increasing index
//! counter. Its lifecycle is `new → open → derive_child* → reset/drop`; the
//! mnemonic and seed never outlive [`Session::open`].

use core::fmt;
use core::marker::PhantomData;

use log::{debug, warn};
use zeroize::Zeroizing;

use crate::{
    ChildIndex, DerivationPath, DerivedKey, Error, KeyFamily, Mnemonic, PathTemplate, Result,
};

/// Consecutive failed indices tolerated before a derivation is surfaced.
const DEFAULT_MAX_CONSECUTIVE_FAILURES: u32 = 3;

/// A wallet derived at one index of a session.
///
/// Carries the path and public identity plus the private key, which is only
/// reachable through [`ChildWallet::secret_bytes`] and
/// [`ChildWallet::secret_hex`]. Nothing here can be turned back into the
/// mnemonic or seed.
#[derive(Clone, PartialEq, Eq)]
pub struct ChildWallet {
    index: u32,
    path: DerivationPath,
    public_key: Vec<u8>,
    address: String,
    secret: Zeroizing<[u8; 32]>,
}

impl ChildWallet {
    fn new(index: u32, path: DerivationPath, key: DerivedKey) -> Self {
        Self {
            index,
            path,
            public_key: key.public_key,
            address: key.address,
            secret: key.secret,
        }
    }

    /// Index that filled the template slot.
    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Full derivation path, e.g. `m/44'/60'/0'/0/0`.
    #[inline]
    pub const fn path(&self) -> &DerivationPath {
        &self.path
    }

    /// Address in the family's canonical encoding.
    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Public key bytes in the family's encoding.
    #[inline]
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Public key as lowercase hex without prefix.
    pub fn public_key_hex(&self) -> String {
        hex::encode(&self.public_key)
    }

    /// Private key bytes (zeroized on drop).
    pub fn secret_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(*self.secret)
    }

    /// Private key as lowercase hex without prefix (zeroized on drop).
    pub fn secret_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.secret.as_slice()))
    }
}

impl fmt::Debug for ChildWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildWallet")
            .field("index", &self.index)
            .field("path", &self.path.to_string())
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Derive the wallet at `index` of `template` in a single attempt.
///
/// # Errors
///
/// Returns [`Error::IndexExhausted`] if `index >= 2^31`, otherwise whatever
/// the family reports for this path.
pub fn derive_child<F: KeyFamily>(
    root: &F::Root,
    template: &PathTemplate,
    index: u32,
) -> Result<ChildWallet> {
    let path = template.path(index)?;
    let key = F::derive(root, &path)?;
    Ok(ChildWallet::new(index, path, key))
}

/// Engine settings for a [`Session`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    template: PathTemplate,
    max_consecutive_failures: u32,
}

impl SessionConfig {
    /// Settings with the given template and the default failure bound.
    pub fn new(template: PathTemplate) -> Self {
        Self {
            template,
            max_consecutive_failures: DEFAULT_MAX_CONSECUTIVE_FAILURES,
        }
    }

    /// Set how many consecutive indices may fail before giving up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `max` is zero.
    pub fn with_max_consecutive_failures(mut self, max: u32) -> Result<Self> {
        if max == 0 {
            return Err(Error::InvalidConfig("max_consecutive_failures must be at least 1"));
        }
        self.max_consecutive_failures = max;
        Ok(self)
    }

    /// Template used to build each path.
    pub const fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Failure bound for the skip-to-next-index policy.
    pub const fn max_consecutive_failures(&self) -> u32 {
        self.max_consecutive_failures
    }
}

/// HD derivation engine for one mnemonic at a time.
///
/// Mutation goes through `&mut self`; share it across threads behind a
/// mutex.
pub struct Session<F: KeyFamily> {
    config: SessionConfig,
    root: Option<F::Root>,
    next_index: u32,
    _family: PhantomData<F>,
}

impl<F: KeyFamily> Session<F> {
    /// Create an empty session.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            root: None,
            next_index: 0,
            _family: PhantomData,
        }
    }

    /// Create a session around an existing root node.
    pub fn with_root(config: SessionConfig, root: F::Root) -> Self {
        let mut session = Self::new(config);
        session.root = Some(root);
        session
    }

    /// Load a mnemonic: derive the seed and root, then drop the seed.
    ///
    /// Any previous root is discarded and the index counter restarts at 0.
    ///
    /// # Errors
    ///
    /// Returns the family's error if the root cannot be built.
    pub fn open(&mut self, mnemonic: &Mnemonic, passphrase: &str) -> Result<()> {
        let seed = mnemonic.to_seed(passphrase);
        let root = F::root(&seed)?;
        self.reset();
        self.root = Some(root);
        debug!("{} session opened with template {}", F::NAME, self.config.template);
        Ok(())
    }

    /// Discard the root node and index counter.
    pub fn reset(&mut self) {
        self.root = None;
        self.next_index = 0;
    }

    /// Whether a root node is loaded.
    pub const fn is_open(&self) -> bool {
        self.root.is_some()
    }

    /// Index the next call to [`Session::derive_child`] will try first.
    pub const fn next_index(&self) -> u32 {
        self.next_index
    }

    /// Session settings.
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Derive the next wallet.
    ///
    /// A retryable failure burns the index and moves on to the next one;
    /// indices are never handed out twice within a session.
    ///
    /// # Errors
    ///
    /// - [`Error::NoRoot`] if no mnemonic is loaded.
    /// - [`Error::DerivationExhausted`] after `max_consecutive_failures`
    ///   failed indices in a row, or when the last index in range fails.
    /// - [`Error::IndexExhausted`] once the index space is used up.
    /// - Any non-retryable family error, unchanged.
    pub fn derive_child(&mut self) -> Result<ChildWallet> {
        let root = self.root.as_ref().ok_or(Error::NoRoot)?;
        let mut failures = 0;

        loop {
            let index = self.next_index;
            match derive_child::<F>(root, &self.config.template, index) {
                Ok(wallet) => {
                    self.next_index = index + 1;
                    debug!("derived {} wallet at {}", F::NAME, wallet.path);
                    return Ok(wallet);
                }
                Err(Error::Derivation { path, reason }) => {
                    failures += 1;
                    // `index` filled the template, so it is below 2^31.
                    self.next_index = index + 1;
                    warn!("skipping unusable {} key at {path}: {reason}", F::NAME);

                    let out_of_indices = self.next_index >= ChildIndex::HARDENED_OFFSET;
                    if out_of_indices || failures >= self.config.max_consecutive_failures {
                        return Err(Error::DerivationExhausted {
                            last_index: index,
                            attempts: failures,
                            reason,
                        });
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Derive the next `count` wallets.
    ///
    /// # Errors
    ///
    /// Stops at the first error from [`Session::derive_child`].
    pub fn derive_many(&mut self, count: u32) -> Result<Vec<ChildWallet>> {
        (0..count).map(|_| self.derive_child()).collect()
    }
}

impl<F: KeyFamily> fmt::Debug for Session<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("family", &F::NAME)
            .field("config", &self.config)
            .field("open", &self.is_open())
            .field("next_index", &self.next_index)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{ChildIndex, Seed};

    /// Test family: address is the path itself, chosen indices fail.
    struct Flaky;

    struct FlakyRoot {
        seed_byte: u8,
        bad: BTreeSet<u32>,
    }

    impl KeyFamily for Flaky {
        type Root = FlakyRoot;
        const NAME: &'static str = "flaky";

        fn root(seed: &Seed) -> Result<FlakyRoot> {
            Ok(FlakyRoot {
                seed_byte: seed.as_bytes()[0],
                bad: BTreeSet::new(),
            })
        }

        fn derive(root: &FlakyRoot, path: &DerivationPath) -> Result<DerivedKey> {
            let index = path.last().map_or(0, |i| i.index());
            if root.bad.contains(&index) {
                return Err(Error::Derivation {
                    path: path.to_string(),
                    reason: "invalid child key".into(),
                });
            }
            if path.is_fully_hardened() {
                return Err(Error::InvalidPath("refusing hardened-only path".into()));
            }
            let mut secret = Zeroizing::new([root.seed_byte; 32]);
            secret[..4].copy_from_slice(&index.to_be_bytes());
            Ok(DerivedKey::new(secret, index.to_be_bytes().to_vec(), path.to_string()))
        }
    }

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn config() -> SessionConfig {
        SessionConfig::new(PathTemplate::bip44(60).unwrap())
    }

    fn flaky(bad: &[u32], max: u32) -> Session<Flaky> {
        let config = config().with_max_consecutive_failures(max).unwrap();
        let root = FlakyRoot {
            seed_byte: 7,
            bad: bad.iter().copied().collect(),
        };
        Session::with_root(config, root)
    }

    #[test]
    fn test_indices_are_sequential() {
        let mut session = flaky(&[], 3);
        let wallets = session.derive_many(4).unwrap();
        let indices: Vec<u32> = wallets.iter().map(ChildWallet::index).collect();
        assert_eq!(indices, [0, 1, 2, 3]);
        assert_eq!(wallets[2].path().to_string(), "m/44'/60'/0'/0/2");
        assert_eq!(session.next_index(), 4);
    }

    #[test]
    fn test_failed_index_is_skipped() {
        let mut session = flaky(&[1], 3);
        let first = session.derive_child().unwrap();
        let second = session.derive_child().unwrap();
        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 2);
        assert_eq!(second.path().last(), Some(ChildIndex::Normal(2)));
        assert_eq!(session.next_index(), 3);
    }

    #[test]
    fn test_consecutive_failures_surface() {
        let mut session = flaky(&[0, 1, 2], 3);
        let err = session.derive_child().unwrap_err();
        assert!(matches!(
            err,
            Error::DerivationExhausted {
                last_index: 2,
                attempts: 3,
                ..
            }
        ));
        // Burned indices are not handed out again.
        assert_eq!(session.derive_child().unwrap().index(), 3);
    }

    #[test]
    fn test_failure_bound_is_configurable() {
        let mut session = flaky(&[0], 1);
        assert!(matches!(
            session.derive_child(),
            Err(Error::DerivationExhausted { last_index: 0, attempts: 1, .. })
        ));
        assert!(config().with_max_consecutive_failures(0).is_err());
    }

    #[test]
    fn test_failure_at_last_index_keeps_reason() {
        let last = ChildIndex::HARDENED_OFFSET - 1;
        let mut session = flaky(&[last], 3);
        session.next_index = last;

        match session.derive_child() {
            Err(Error::DerivationExhausted {
                last_index,
                attempts,
                reason,
            }) => {
                assert_eq!(last_index, last);
                assert_eq!(attempts, 1);
                assert_eq!(reason, "invalid child key");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(session.derive_child(), Err(Error::IndexExhausted)));
    }

    #[test]
    fn test_terminal_errors_are_not_retried() {
        let template: PathTemplate = "m/44'/{index}'".parse().unwrap();
        let mut session: Session<Flaky> = Session::with_root(
            SessionConfig::new(template),
            FlakyRoot {
                seed_byte: 0,
                bad: BTreeSet::new(),
            },
        );
        assert!(matches!(session.derive_child(), Err(Error::InvalidPath(_))));
        assert_eq!(session.next_index(), 0);
    }

    #[test]
    fn test_derive_without_root() {
        let mut session: Session<Flaky> = Session::new(config());
        assert!(!session.is_open());
        assert!(matches!(session.derive_child(), Err(Error::NoRoot)));
    }

    #[test]
    fn test_reset_restarts_at_zero() {
        let mnemonic = Mnemonic::parse(TEST_MNEMONIC).unwrap();
        let mut session: Session<Flaky> = Session::new(config());
        session.open(&mnemonic, "").unwrap();
        let first = session.derive_child().unwrap();
        session.derive_child().unwrap();

        session.reset();
        assert!(!session.is_open());
        assert_eq!(session.next_index(), 0);
        assert!(matches!(session.derive_child(), Err(Error::NoRoot)));

        session.open(&mnemonic, "").unwrap();
        assert_eq!(session.derive_child().unwrap(), first);
    }

    #[test]
    fn test_open_restarts_counter() {
        let mnemonic = Mnemonic::parse(TEST_MNEMONIC).unwrap();
        let mut session: Session<Flaky> = Session::new(config());
        session.open(&mnemonic, "").unwrap();
        session.derive_many(3).unwrap();
        session.open(&mnemonic, "other").unwrap();
        assert_eq!(session.next_index(), 0);
    }

    #[test]
    fn test_child_wallet_debug_hides_secret() {
        let mut session = flaky(&[], 3);
        let wallet = session.derive_child().unwrap();
        let rendered = format!("{wallet:?}");
        assert!(!rendered.contains(wallet.secret_hex().as_str()));
        assert!(rendered.contains("m/44'/60'/0'/0/0"));
    }
}
