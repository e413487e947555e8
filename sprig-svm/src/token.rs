//! Validated parameters for launching a fungible token.

use log::debug;

/// Longest token name in bytes.
pub const MAX_NAME_LEN: usize = 32;
/// Longest token symbol in bytes.
pub const MAX_SYMBOL_LEN: usize = 10;
/// Longest metadata URI in bytes.
pub const MAX_URI_LEN: usize = 200;
/// Decimals used when none are given.
pub const DEFAULT_DECIMALS: u8 = 9;
/// Largest decimals value for which one whole token fits in a `u64`.
pub const MAX_DECIMALS: u8 = 19;

const URI_SCHEMES: &[&str] = &["https://", "http://", "ipfs://", "ar://"];

/// Reasons a [`TokenConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TokenConfigError {
    /// Name is empty.
    #[error("token name must not be empty")]
    EmptyName,

    /// Name exceeds [`MAX_NAME_LEN`] bytes.
    #[error("token name is {0} bytes, at most {MAX_NAME_LEN} allowed")]
    NameTooLong(usize),

    /// Symbol is empty.
    #[error("token symbol must not be empty")]
    EmptySymbol,

    /// Symbol exceeds [`MAX_SYMBOL_LEN`] bytes.
    #[error("token symbol is {0} bytes, at most {MAX_SYMBOL_LEN} allowed")]
    SymbolTooLong(usize),

    /// URI exceeds [`MAX_URI_LEN`] bytes.
    #[error("metadata uri is {0} bytes, at most {MAX_URI_LEN} allowed")]
    UriTooLong(usize),

    /// URI is not http(s), ipfs or arweave.
    #[error("metadata uri '{0}' must start with https://, http://, ipfs:// or ar://")]
    UnsupportedUri(String),

    /// Supply text is not an unsigned integer.
    #[error("initial supply '{0}' is not a whole number")]
    InvalidSupply(String),

    /// Supply is zero.
    #[error("initial supply must be greater than zero")]
    ZeroSupply,

    /// Decimals text is not an integer.
    #[error("decimals '{0}' is not a whole number")]
    InvalidDecimals(String),

    /// Decimals above [`MAX_DECIMALS`].
    #[error("decimals {0} exceeds the maximum of {MAX_DECIMALS}")]
    DecimalsTooLarge(u8),

    /// Supply times 10^decimals does not fit in a `u64`.
    #[error("initial supply {supply} with {decimals} decimals overflows a u64")]
    SupplyOverflow {
        /// Whole-token supply.
        supply: u64,
        /// Decimals in effect.
        decimals: u8,
    },
}

/// Token launch parameters that passed validation.
///
/// Built with [`TokenConfig::new`] or from raw form input with
/// [`TokenConfig::from_fields`]; every field is checked before the value
/// exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    name: String,
    symbol: String,
    uri: String,
    initial_supply: u64,
    decimals: u8,
}

impl TokenConfig {
    /// Validate a configuration with [`DEFAULT_DECIMALS`].
    ///
    /// # Errors
    ///
    /// Returns the [`TokenConfigError`] of the first field that fails.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        uri: impl Into<String>,
        initial_supply: u64,
    ) -> Result<Self, TokenConfigError> {
        let config = Self {
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
            initial_supply,
            decimals: DEFAULT_DECIMALS,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse untyped form fields. Surrounding whitespace is ignored;
    /// `decimals` falls back to [`DEFAULT_DECIMALS`] when empty.
    ///
    /// # Errors
    ///
    /// Returns the [`TokenConfigError`] of the first field that fails.
    pub fn from_fields(
        name: &str,
        symbol: &str,
        uri: &str,
        initial_supply: &str,
        decimals: &str,
    ) -> Result<Self, TokenConfigError> {
        let supply_text = initial_supply.trim();
        let supply = supply_text
            .parse::<u64>()
            .map_err(|_| TokenConfigError::InvalidSupply(supply_text.into()))?;

        let decimals_text = decimals.trim();
        let decimals = if decimals_text.is_empty() {
            DEFAULT_DECIMALS
        } else {
            decimals_text
                .parse::<u8>()
                .map_err(|_| TokenConfigError::InvalidDecimals(decimals_text.into()))?
        };

        let config = Self {
            name: name.trim().into(),
            symbol: symbol.trim().into(),
            uri: uri.trim().into(),
            initial_supply: supply,
            decimals,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the decimals.
    ///
    /// # Errors
    ///
    /// Returns [`TokenConfigError::DecimalsTooLarge`] or
    /// [`TokenConfigError::SupplyOverflow`].
    pub fn with_decimals(mut self, decimals: u8) -> Result<Self, TokenConfigError> {
        self.decimals = decimals;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), TokenConfigError> {
        if self.name.is_empty() {
            return Err(TokenConfigError::EmptyName);
        }
        if self.name.len() > MAX_NAME_LEN {
            return Err(TokenConfigError::NameTooLong(self.name.len()));
        }
        if self.symbol.is_empty() {
            return Err(TokenConfigError::EmptySymbol);
        }
        if self.symbol.len() > MAX_SYMBOL_LEN {
            return Err(TokenConfigError::SymbolTooLong(self.symbol.len()));
        }
        if self.uri.len() > MAX_URI_LEN {
            return Err(TokenConfigError::UriTooLong(self.uri.len()));
        }
        if !self.uri.is_empty() && !URI_SCHEMES.iter().any(|scheme| self.uri.starts_with(scheme)) {
            return Err(TokenConfigError::UnsupportedUri(self.uri.clone()));
        }
        if self.initial_supply == 0 {
            return Err(TokenConfigError::ZeroSupply);
        }
        if self.decimals > MAX_DECIMALS {
            return Err(TokenConfigError::DecimalsTooLarge(self.decimals));
        }
        if self.checked_base_units().is_none() {
            return Err(TokenConfigError::SupplyOverflow {
                supply: self.initial_supply,
                decimals: self.decimals,
            });
        }
        debug!("token config {} ({}) accepted", self.name, self.symbol);
        Ok(())
    }

    fn checked_base_units(&self) -> Option<u64> {
        10u64
            .checked_pow(u32::from(self.decimals))
            .and_then(|scale| self.initial_supply.checked_mul(scale))
    }

    /// Token name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Metadata URI, possibly empty.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Supply in whole tokens.
    pub const fn initial_supply(&self) -> u64 {
        self.initial_supply
    }

    /// Decimal places of the mint.
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Supply in the smallest unit, `initial_supply * 10^decimals`.
    pub fn base_units(&self) -> u64 {
        // Overflow is rejected during validation.
        self.checked_base_units().unwrap_or(u64::MAX)
    }
}
