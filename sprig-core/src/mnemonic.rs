//! BIP-39 mnemonic generation and seed stretching.

use core::fmt;

use rand_core::{CryptoRng, OsRng, RngCore};
use zeroize::Zeroizing;

use crate::{Error, Result};

/// Valid mnemonic lengths and the entropy size each one encodes.
const WORD_COUNTS: [(usize, usize); 5] = [(12, 16), (15, 20), (18, 24), (21, 28), (24, 32)];

/// A checksum-validated BIP-39 English mnemonic.
///
/// The phrase is only rendered through [`fmt::Display`] and
/// [`Mnemonic::phrase`]; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    inner: bip39::Mnemonic,
}

impl Mnemonic {
    /// Generate a new mnemonic from the operating system RNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWordCount`] for unsupported lengths and
    /// [`Error::EntropySource`] if the RNG cannot be read.
    pub fn generate(word_count: usize) -> Result<Self> {
        Self::generate_with(&mut OsRng, word_count)
    }

    /// Generate a new mnemonic from a caller-provided RNG.
    ///
    /// # Errors
    ///
    /// Same as [`Mnemonic::generate`].
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R, word_count: usize) -> Result<Self> {
        let entropy_len = WORD_COUNTS
            .iter()
            .find(|(words, _)| *words == word_count)
            .map(|(_, len)| *len)
            .ok_or(Error::InvalidWordCount(word_count))?;

        let mut entropy = Zeroizing::new([0u8; 32]);
        rng.try_fill_bytes(&mut entropy[..entropy_len])
            .map_err(Error::EntropySource)?;

        Self::from_entropy(&entropy[..entropy_len])
    }

    /// Build a mnemonic from raw entropy (16, 20, 24, 28 or 32 bytes).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMnemonic`] if the entropy length is invalid.
    pub fn from_entropy(entropy: &[u8]) -> Result<Self> {
        let inner = bip39::Mnemonic::from_entropy(entropy)?;
        Ok(Self { inner })
    }

    /// Parse and checksum-validate a phrase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMnemonic`] on an unknown word, a bad word
    /// count or a checksum mismatch.
    pub fn parse(phrase: &str) -> Result<Self> {
        let inner: bip39::Mnemonic = phrase.parse()?;
        Ok(Self { inner })
    }

    /// Stretch the mnemonic and passphrase into a 64-byte seed.
    #[must_use]
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        Seed(Zeroizing::new(self.inner.to_seed(passphrase)))
    }

    /// The phrase as a single space-separated string (zeroized on drop).
    #[must_use]
    pub fn phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(self.inner.to_string())
    }

    /// Number of words in the phrase.
    #[inline]
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("words", &self.word_count())
            .finish_non_exhaustive()
    }
}

impl core::str::FromStr for Mnemonic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// 64-byte BIP-39 seed, zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed(Zeroizing<[u8; 64]>);

impl Seed {
    /// Wrap raw seed bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Raw seed bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

/// Generate a fresh mnemonic from the operating system RNG.
///
/// # Errors
///
/// See [`Mnemonic::generate`].
pub fn generate_mnemonic(word_count: usize) -> Result<Mnemonic> {
    Mnemonic::generate(word_count)
}

/// Validate `phrase` and stretch it with `passphrase` into a seed.
///
/// # Errors
///
/// Returns [`Error::InvalidMnemonic`] if the phrase fails validation.
pub fn derive_seed(phrase: &str, passphrase: &str) -> Result<Seed> {
    Ok(Mnemonic::parse(phrase)?.to_seed(passphrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    /// RNG whose source is permanently unavailable.
    struct OfflineRng;

    impl RngCore for OfflineRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
            Err(rand_core::Error::new("rng offline"))
        }
    }

    impl CryptoRng for OfflineRng {}

    #[test]
    fn test_generate_word_counts() {
        for words in [12, 15, 18, 21, 24] {
            let mnemonic = generate_mnemonic(words).unwrap();
            assert_eq!(mnemonic.word_count(), words);
            // A generated phrase must survive its own checksum validation.
            assert!(Mnemonic::parse(&mnemonic.phrase()).is_ok());
        }
    }

    #[test]
    fn test_generate_invalid_word_count() {
        assert!(matches!(generate_mnemonic(13), Err(Error::InvalidWordCount(13))));
        assert!(matches!(generate_mnemonic(0), Err(Error::InvalidWordCount(0))));
    }

    #[test]
    fn test_generate_entropy_failure() {
        let result = Mnemonic::generate_with(&mut OfflineRng, 12);
        assert!(matches!(result, Err(Error::EntropySource(_))));
    }

    #[test]
    fn test_generated_mnemonics_differ() {
        let a = generate_mnemonic(12).unwrap();
        let b = generate_mnemonic(12).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_entropy_zero() {
        let mnemonic = Mnemonic::from_entropy(&[0u8; 16]).unwrap();
        assert_eq!(mnemonic.to_string(), TEST_MNEMONIC);
    }

    #[test]
    fn test_reference_seed() {
        let seed = derive_seed(TEST_MNEMONIC, "").unwrap();
        let expected = hex_literal::hex!(
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1"
            "9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
        assert_eq!(seed.as_bytes(), &expected);
    }

    #[test]
    fn test_seed_deterministic() {
        let a = derive_seed(TEST_MNEMONIC, "test").unwrap();
        let b = derive_seed(TEST_MNEMONIC, "test").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_passphrase_changes_seed() {
        let a = derive_seed(TEST_MNEMONIC, "").unwrap();
        let b = derive_seed(TEST_MNEMONIC, "password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_corrupted_checksum_rejected() {
        // Every word is valid, the last one breaks the checksum.
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(matches!(derive_seed(bad, ""), Err(Error::InvalidMnemonic(_))));
    }

    #[test]
    fn test_unknown_word_rejected() {
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon zzzz";
        assert!(matches!(Mnemonic::parse(bad), Err(Error::InvalidMnemonic(_))));
    }

    #[test]
    fn test_debug_redacts_phrase() {
        let mnemonic = Mnemonic::parse(TEST_MNEMONIC).unwrap();
        let seed = mnemonic.to_seed("");
        assert!(!format!("{mnemonic:?}").contains("abandon"));
        assert_eq!(format!("{seed:?}"), "Seed(..)");
    }
}
