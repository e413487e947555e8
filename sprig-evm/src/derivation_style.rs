//! Derivation path styles for different wallet software.
//!
//! `MetaMask`, Ledger and Trezor all follow BIP-44 but place the per-wallet
//! index at different levels. Each style maps to a [`PathTemplate`] for any
//! coin type.

use core::fmt;
use core::str::FromStr;

use sprig_core::{ChildIndex, PathTemplate, Result, Segment};

/// SLIP-44 coin type of Ethereum.
pub const ETHEREUM_COIN_TYPE: u32 = 60;

/// EVM derivation path styles.
///
/// # Path Specifications
///
/// - **MetaMask/Trezor**: Standard BIP-44 `m/44'/{coin}'/0'/0/{index}`
/// - **Ledger Live**: Account-based `m/44'/{coin}'/{index}'/0/0`
/// - **Ledger Legacy**: MEW/MyCrypto compatible `m/44'/{coin}'/0'/{index}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum DerivationStyle {
    /// Standard BIP-44 path used by `MetaMask` and Trezor.
    ///
    /// Purpose 44', coin type hardened, account 0', external chain 0, and a
    /// non-hardened address index.
    #[default]
    Standard,

    /// Ledger Live: each index is a separate hardened account.
    LedgerLive,

    /// Ledger Legacy (MEW/MyCrypto): index at the fourth level, no change step.
    LedgerLegacy,
}

impl DerivationStyle {
    /// Template for this style under `coin_type`.
    ///
    /// # Errors
    ///
    /// Returns an error if `coin_type >= 2^31`.
    pub fn template(self, coin_type: u32) -> Result<PathTemplate> {
        let purpose = Segment::Fixed(ChildIndex::hardened(44)?);
        let coin = Segment::Fixed(ChildIndex::hardened(coin_type)?);
        let zero = Segment::Fixed(ChildIndex::Normal(0));

        let segments = match self {
            Self::Standard => vec![
                purpose,
                coin,
                Segment::Fixed(ChildIndex::Hardened(0)),
                zero,
                Segment::Index { hardened: false },
            ],
            Self::LedgerLive => vec![purpose, coin, Segment::Index { hardened: true }, zero, zero],
            Self::LedgerLegacy => vec![
                purpose,
                coin,
                Segment::Fixed(ChildIndex::Hardened(0)),
                Segment::Index { hardened: false },
            ],
        };
        PathTemplate::new(segments)
    }

    /// Get the human-readable name of this derivation style.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "Standard (MetaMask/Trezor)",
            Self::LedgerLive => "Ledger Live",
            Self::LedgerLegacy => "Ledger Legacy (MEW/MyCrypto)",
        }
    }

    /// Get a short identifier for CLI usage.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::LedgerLive => "ledger-live",
            Self::LedgerLegacy => "ledger-legacy",
        }
    }

    /// Get all available derivation styles.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Standard, Self::LedgerLive, Self::LedgerLegacy]
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
            "standard" | "metamask" | "trezor" | "bip44" => Ok(Self::Standard),
            "ledger-live" | "ledgerlive" | "live" => Ok(Self::LedgerLive),
            "ledger-legacy" | "ledgerlegacy" | "legacy" | "mew" | "mycrypto" => {
                Ok(Self::LedgerLegacy)
            }
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
            "invalid derivation style '{}', expected one of: standard, ledger-live, ledger-legacy",
            self.0
        )
    }
}

impl std::error::Error for ParseDerivationStyleError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(style: DerivationStyle, coin: u32, index: u32) -> String {
        style.template(coin).unwrap().path(index).unwrap().to_string()
    }

    #[test]
    fn test_standard_paths() {
        let style = DerivationStyle::Standard;
        assert_eq!(path(style, 60, 0), "m/44'/60'/0'/0/0");
        assert_eq!(path(style, 60, 1), "m/44'/60'/0'/0/1");
        assert_eq!(path(style, 60, 10), "m/44'/60'/0'/0/10");
    }

    #[test]
    fn test_ledger_live_paths() {
        let style = DerivationStyle::LedgerLive;
        assert_eq!(path(style, 60, 0), "m/44'/60'/0'/0/0");
        assert_eq!(path(style, 60, 1), "m/44'/60'/1'/0/0");
        assert_eq!(path(style, 60, 10), "m/44'/60'/10'/0/0");
    }

    #[test]
    fn test_ledger_legacy_paths() {
        let style = DerivationStyle::LedgerLegacy;
        assert_eq!(path(style, 60, 0), "m/44'/60'/0'/0");
        assert_eq!(path(style, 60, 1), "m/44'/60'/0'/1");
        assert_eq!(path(style, 60, 10), "m/44'/60'/0'/10");
    }

    #[test]
    fn test_coin_type_is_configurable() {
        assert_eq!(path(DerivationStyle::Standard, 61, 2), "m/44'/61'/0'/0/2");
        let template = DerivationStyle::LedgerLive.template(966).unwrap();
        assert_eq!(template.coin_type(), Some(966));
        assert_eq!(template.to_string(), "m/44'/966'/{index}'/0/0");
        assert!(DerivationStyle::Standard.template(0x8000_0000).is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("standard".parse::<DerivationStyle>().unwrap(), DerivationStyle::Standard);
        assert_eq!("MetaMask".parse::<DerivationStyle>().unwrap(), DerivationStyle::Standard);
        assert_eq!("live".parse::<DerivationStyle>().unwrap(), DerivationStyle::LedgerLive);
        assert_eq!("mew".parse::<DerivationStyle>().unwrap(), DerivationStyle::LedgerLegacy);
        assert!("invalid".parse::<DerivationStyle>().is_err());
    }

    #[test]
    fn test_ids_round_trip() {
        for style in DerivationStyle::all() {
            assert_eq!(style.id().parse::<DerivationStyle>().unwrap(), *style);
        }
    }
}
