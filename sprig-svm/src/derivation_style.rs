//! Derivation path styles for different Solana wallet software.
//!
//! Phantom, Trust Wallet and Ledger Live all put the per-wallet index at the
//! account level but disagree on the trailing steps. SLIP-0010 ed25519 only
//! supports hardened steps, so every style is fully hardened.

use core::fmt;
use core::str::FromStr;

use sprig_core::{ChildIndex, PathTemplate, Result, Segment};

/// SLIP-44 coin type of Solana.
pub const SOLANA_COIN_TYPE: u32 = 501;

/// Solana derivation path styles.
///
/// # Path Specifications
///
/// - **Standard (Phantom/Backpack)**: `m/44'/501'/{index}'/0'`
/// - **Trust**: `m/44'/501'/{index}'`
/// - **Ledger Live**: `m/44'/501'/{index}'/0'/0'`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum DerivationStyle {
    /// Account path with a hardened change step.
    ///
    /// Used by Phantom, Backpack, Solflare and Trezor.
    #[default]
    Standard,

    /// Account path without a change step (Trust Wallet, Ledger native, Keystone).
    Trust,

    /// Ledger Live: change and address steps fixed at `0'`.
    LedgerLive,
}

impl DerivationStyle {
    /// Template for this style.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in styles; the signature mirrors
    /// [`PathTemplate::new`].
    pub fn template(self) -> Result<PathTemplate> {
        let purpose = Segment::Fixed(ChildIndex::hardened(44)?);
        let coin = Segment::Fixed(ChildIndex::hardened(SOLANA_COIN_TYPE)?);
        let account = Segment::Index { hardened: true };
        let zero = Segment::Fixed(ChildIndex::Hardened(0));

        let segments = match self {
            Self::Standard => vec![purpose, coin, account, zero],
            Self::Trust => vec![purpose, coin, account],
            Self::LedgerLive => vec![purpose, coin, account, zero, zero],
        };
        PathTemplate::new(segments)
    }

    /// Get the human-readable name of this derivation style.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "Standard (Phantom/Backpack)",
            Self::Trust => "Trust (Ledger/Keystone)",
            Self::LedgerLive => "Ledger Live",
        }
    }

    /// Get a short identifier for CLI usage.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Trust => "trust",
            Self::LedgerLive => "ledger-live",
        }
    }

    /// Get all available derivation styles.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Standard, Self::Trust, Self::LedgerLive]
    }
}

impl fmt::Display for DerivationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DerivationStyle {
    type Err = ParseDerivationStyleError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "phantom" | "backpack" | "solflare" | "trezor" => Ok(Self::Standard),
            "trust" | "trustwallet" | "ledger" | "ledger-native" | "keystone" => Ok(Self::Trust),
            "ledger-live" | "ledgerlive" | "live" => Ok(Self::LedgerLive),
            _ => Err(ParseDerivationStyleError(s.into())),
        }
    }
}

/// Error returned when parsing an invalid derivation style string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDerivationStyleError(pub(crate) String);

impl fmt::Display for ParseDerivationStyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid derivation style '{}', expected one of: standard, trust, ledger-live",
            self.0
        )
    }
}

impl std::error::Error for ParseDerivationStyleError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(style: DerivationStyle, index: u32) -> String {
        style.template().unwrap().path(index).unwrap().to_string()
    }

    #[test]
    fn test_standard_paths() {
        assert_eq!(path(DerivationStyle::Standard, 0), "m/44'/501'/0'/0'");
        assert_eq!(path(DerivationStyle::Standard, 10), "m/44'/501'/10'/0'");
    }

    #[test]
    fn test_trust_paths() {
        assert_eq!(path(DerivationStyle::Trust, 0), "m/44'/501'/0'");
        assert_eq!(path(DerivationStyle::Trust, 7), "m/44'/501'/7'");
    }

    #[test]
    fn test_ledger_live_paths() {
        assert_eq!(path(DerivationStyle::LedgerLive, 1), "m/44'/501'/1'/0'/0'");
    }

    #[test]
    fn test_all_styles_fully_hardened() {
        for style in DerivationStyle::all() {
            let template = style.template().unwrap();
            assert!(template.is_fully_hardened(), "{style}");
            assert_eq!(template.coin_type(), Some(SOLANA_COIN_TYPE));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("phantom".parse::<DerivationStyle>().unwrap(), DerivationStyle::Standard);
        assert_eq!("Ledger".parse::<DerivationStyle>().unwrap(), DerivationStyle::Trust);
        assert_eq!("live".parse::<DerivationStyle>().unwrap(), DerivationStyle::LedgerLive);
        assert!("legacy".parse::<DerivationStyle>().is_err());
    }

    #[test]
    fn test_ids_round_trip() {
        for style in DerivationStyle::all() {
            assert_eq!(style.id().parse::<DerivationStyle>().unwrap(), *style);
        }
    }
}
