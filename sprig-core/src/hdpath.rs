//! BIP-32 derivation paths and the templates that generate them.
//!
//! A [`PathTemplate`] is a fixed table of segments with exactly one
//! variable slot, e.g. `m/44'/60'/0'/0/{index}`. Filling the slot yields a
//! concrete [`DerivationPath`].

use core::fmt;
use core::str::FromStr;

use crate::{Error, Result};

/// Placeholder used for the variable slot in a rendered template.
const INDEX_PLACEHOLDER: &str = "{index}";

/// A child index in a derivation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChildIndex {
    /// Normal (non-hardened) index: 0 to 2^31 - 1
    Normal(u32),
    /// Hardened index: displayed as n', stored as n
    Hardened(u32),
}

impl ChildIndex {
    /// The offset for hardened indices (2^31).
    pub const HARDENED_OFFSET: u32 = 0x8000_0000;

    /// Create a normal (non-hardened) child index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `index >= 2^31`.
    pub fn normal(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            return Err(Error::InvalidPath(format!("index {index} out of range")));
        }
        Ok(Self::Normal(index))
    }

    /// Create a hardened child index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `index >= 2^31`.
    pub fn hardened(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            return Err(Error::InvalidPath(format!("index {index}' out of range")));
        }
        Ok(Self::Hardened(index))
    }

    /// Check if this is a hardened index.
    pub const fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /// Get the raw index value (without hardened flag).
    pub const fn index(&self) -> u32 {
        match self {
            Self::Normal(i) | Self::Hardened(i) => *i,
        }
    }

    /// Convert to the raw u32 value used in BIP-32 derivation.
    pub const fn to_u32(&self) -> u32 {
        match self {
            Self::Normal(i) => *i,
            Self::Hardened(i) => *i | Self::HARDENED_OFFSET,
        }
    }
}

impl From<u32> for ChildIndex {
    fn from(value: u32) -> Self {
        if value >= Self::HARDENED_OFFSET {
            Self::Hardened(value & !Self::HARDENED_OFFSET)
        } else {
            Self::Normal(value)
        }
    }
}

impl From<ChildIndex> for u32 {
    fn from(index: ChildIndex) -> Self {
        index.to_u32()
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(i) => write!(f, "{i}"),
            Self::Hardened(i) => write!(f, "{i}'"),
        }
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPath(format!("bad path component '{s}'"));
        let (digits, hardened) = match s.strip_suffix(['\'', 'h', 'H']) {
            Some(digits) => (digits, true),
            None => (s, false),
        };
        // Plain decimal only: no sign, no whitespace.
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let index = digits.parse().map_err(|_| invalid())?;
        if hardened {
            Self::hardened(index)
        } else {
            Self::normal(index)
        }
    }
}

/// Strip a leading `m/` (or a bare `m`) from a path-like string.
fn strip_master(s: &str) -> Result<&str> {
    let s = s.trim();
    match s {
        "m" | "M" => Ok(""),
        _ => s
            .strip_prefix("m/")
            .or_else(|| s.strip_prefix("M/"))
            .ok_or_else(|| Error::InvalidPath(format!("'{s}' must start with m/"))),
    }
}

/// A BIP-32 derivation path such as `m/44'/60'/0'/0/0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<ChildIndex>,
}

impl DerivationPath {
    /// The empty path (master key).
    pub fn master() -> Self {
        Self::default()
    }

    /// Create a derivation path from a vector of child indices.
    pub fn new(indices: Vec<ChildIndex>) -> Self {
        Self { indices }
    }

    /// Parse a path like `m/44'/60'/0'/0/0` or `m/44h/501h/0h/0h`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for a missing `m/` prefix, empty or
    /// non-numeric components, or out-of-range indices.
    pub fn parse(path: &str) -> Result<Self> {
        let body = strip_master(path)?;
        if body.is_empty() {
            return Ok(Self::master());
        }

        let indices = body
            .split('/')
            .map(ChildIndex::from_str)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { indices })
    }

    /// Get the child indices in this path.
    pub fn indices(&self) -> &[ChildIndex] {
        &self.indices
    }

    /// Get the number of levels in this path.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Check if this path is empty (master key).
    pub fn is_master(&self) -> bool {
        self.indices.is_empty()
    }

    /// Check whether every step is hardened.
    pub fn is_fully_hardened(&self) -> bool {
        self.indices.iter().all(ChildIndex::is_hardened)
    }

    /// The last step of the path, if any.
    pub fn last(&self) -> Option<ChildIndex> {
        self.indices.last().copied()
    }

    /// Append a child index to the path.
    #[must_use]
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        Self { indices }
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// One step of a [`PathTemplate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A step that is the same for every derived wallet.
    Fixed(ChildIndex),
    /// The per-wallet index slot.
    Index {
        /// Whether the slot is filled with a hardened index.
        hardened: bool,
    },
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(index) => write!(f, "{index}"),
            Self::Index { hardened: false } => f.write_str(INDEX_PLACEHOLDER),
            Self::Index { hardened: true } => write!(f, "{INDEX_PLACEHOLDER}'"),
        }
    }
}

/// Table-driven path generator with exactly one variable index slot.
///
/// The coin-type step is part of the table, so one engine serves any asset
/// family.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Build a template from segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTemplate`] unless exactly one segment is
    /// [`Segment::Index`].
    pub fn new(segments: Vec<Segment>) -> Result<Self> {
        let slots = segments
            .iter()
            .filter(|s| matches!(s, Segment::Index { .. }))
            .count();
        if slots != 1 {
            return Err(Error::InvalidTemplate(format!(
                "expected exactly one {INDEX_PLACEHOLDER} slot, found {slots}"
            )));
        }
        Ok(Self { segments })
    }

    /// BIP-44 external chain: `m/44'/{coin_type}'/0'/0/{index}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `coin_type >= 2^31`.
    pub fn bip44(coin_type: u32) -> Result<Self> {
        Self::bip44_account(coin_type, 0)
    }

    /// BIP-44 external chain for a given account:
    /// `m/44'/{coin_type}'/{account}'/0/{index}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `coin_type` or `account` is out of range.
    pub fn bip44_account(coin_type: u32, account: u32) -> Result<Self> {
        Self::new(vec![
            Segment::Fixed(ChildIndex::hardened(44)?),
            Segment::Fixed(ChildIndex::hardened(coin_type)?),
            Segment::Fixed(ChildIndex::hardened(account)?),
            Segment::Fixed(ChildIndex::normal(0)?),
            Segment::Index { hardened: false },
        ])
    }

    /// The template steps in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Coin type of a BIP-44 shaped template (`m/44'/{coin}'/...`).
    pub fn coin_type(&self) -> Option<u32> {
        match self.segments.as_slice() {
            [
                Segment::Fixed(ChildIndex::Hardened(44)),
                Segment::Fixed(ChildIndex::Hardened(coin)),
                ..,
            ] => Some(*coin),
            _ => None,
        }
    }

    /// Whether every step, the index slot included, is hardened.
    pub fn is_fully_hardened(&self) -> bool {
        self.segments.iter().all(|s| match s {
            Segment::Fixed(index) => index.is_hardened(),
            Segment::Index { hardened } => *hardened,
        })
    }

    /// Fill the index slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexExhausted`] if `index >= 2^31`.
    pub fn path(&self, index: u32) -> Result<DerivationPath> {
        if index >= ChildIndex::HARDENED_OFFSET {
            return Err(Error::IndexExhausted);
        }

        let indices = self
            .segments
            .iter()
            .map(|segment| match *segment {
                Segment::Fixed(fixed) => fixed,
                Segment::Index { hardened: true } => ChildIndex::Hardened(index),
                Segment::Index { hardened: false } => ChildIndex::Normal(index),
            })
            .collect();
        Ok(DerivationPath::new(indices))
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for PathTemplate {
    type Err = Error;

    /// Parse a template such as `m/44'/60'/0'/0/{index}`.
    fn from_str(s: &str) -> Result<Self> {
        let body = strip_master(s).map_err(|_| Error::InvalidTemplate(format!("'{s}' must start with m/")))?;

        let segments = body
            .split('/')
            .map(|component| match component.strip_prefix(INDEX_PLACEHOLDER) {
                Some("") => Ok(Segment::Index { hardened: false }),
                Some("'" | "h" | "H") => Ok(Segment::Index { hardened: true }),
                Some(_) => Err(Error::InvalidTemplate(format!("bad slot '{component}'"))),
                None => component.parse().map(Segment::Fixed),
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(segments)
    }
}
