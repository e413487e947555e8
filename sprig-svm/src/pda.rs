//! Program-derived and associated token account addresses.
//!
//! A program-derived address is `sha256(seeds || program_id || "ProgramDerivedAddress")`
//! forced off the ed25519 curve, so no private key exists for it. Associated
//! token accounts are the program-derived address of `[owner, token program, mint]`
//! under the associated-token program.

use core::fmt;
use core::str::FromStr;

use log::debug;
use sha2::{Digest, Sha256};

use crate::{Error, Pubkey, Result};

/// Most seeds accepted by [`create_program_address`], bump included.
pub const MAX_SEEDS: usize = 16;

/// Longest single seed in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Associated token account program.
pub const ASSOCIATED_TOKEN_PROGRAM_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Token program owning a mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenProgram {
    /// The original SPL token program.
    #[default]
    Token,
    /// Token-2022, the extensions program.
    Token2022,
}

impl TokenProgram {
    /// Base58 program id.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Token => "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
            Self::Token2022 => "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb",
        }
    }

    /// Program id as a [`Pubkey`].
    ///
    /// # Errors
    ///
    /// Never fails for the built-in ids.
    pub fn pubkey(self) -> Result<Pubkey> {
        self.id().parse()
    }
}

impl fmt::Display for TokenProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Token => "token",
            Self::Token2022 => "token-2022",
        })
    }
}

impl FromStr for TokenProgram {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "token" | "spl-token" => Ok(Self::Token),
            "token-2022" | "token2022" | "token-22" => Ok(Self::Token2022),
            _ if s == Self::Token.id() => Ok(Self::Token),
            _ if s == Self::Token2022.id() => Ok(Self::Token2022),
            _ => Err(Error::InvalidPubkey(format!("unknown token program '{s}'"))),
        }
    }
}

/// Address for `seeds` (bump included) under `program_id`.
///
/// # Errors
///
/// Returns [`Error::MaxSeedLength`] if there are more than [`MAX_SEEDS`]
/// seeds or one is longer than [`MAX_SEED_LEN`], and [`Error::OnCurve`] if
/// the hash is a valid public key.
pub fn create_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<Pubkey> {
    if seeds.len() > MAX_SEEDS || seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(Error::MaxSeedLength);
    }

    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program_id);
    hasher.update(PDA_MARKER);

    let address = Pubkey::new(hasher.finalize().into());
    if address.is_on_curve() {
        return Err(Error::OnCurve);
    }
    Ok(address)
}

/// First off-curve address and its bump, searching bumps from 255 down.
///
/// At most `MAX_SEEDS - 1` seeds may be passed; the bump takes the last slot.
///
/// # Errors
///
/// Returns [`Error::MaxSeedLength`] on oversized seeds and
/// [`Error::NoViableBump`] if all 256 candidates are on the curve.
pub fn find_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        with_bump.extend_from_slice(seeds);
        with_bump.push(&bump_seed);

        match create_program_address(&with_bump, program_id) {
            Ok(address) => return Ok((address, bump)),
            Err(Error::OnCurve) => {}
            Err(e) => return Err(e),
        }
    }
    Err(Error::NoViableBump)
}

/// Associated token account of `owner` for `mint`, with its bump.
///
/// # Errors
///
/// See [`find_program_address`].
pub fn associated_token_address(
    owner: &Pubkey,
    mint: &Pubkey,
    program: TokenProgram,
) -> Result<(Pubkey, u8)> {
    let token_program = program.pubkey()?;
    let ata_program: Pubkey = ASSOCIATED_TOKEN_PROGRAM_ID.parse()?;

    let found = find_program_address(
        &[owner.as_ref(), token_program.as_ref(), mint.as_ref()],
        &ata_program,
    )?;
    debug!("associated token address for {owner} / {mint} ({program}): {}", found.0);
    Ok(found)
}
