//! Solana keypairs and CLI keypair files.
//!
//! A keypair file is a JSON array of 64 integers: the 32-byte secret
//! followed by the 32-byte public key. Wallets such as Phantom import the
//! same 64 bytes as a base58 string.

use core::{fmt, mem};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use ed25519_dalek::SigningKey;
use log::debug;
use rand_core::OsRng;
use sprig_core::ChildWallet;
use zeroize::Zeroizing;

use crate::{Error, Pubkey, Result};

/// An ed25519 signing key and its public address.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Fresh random keypair from the operating system RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Keypair from a 32-byte secret.
    pub fn from_secret(secret: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(secret),
        }
    }

    /// Keypair for a wallet derived by an ed25519 session.
    pub fn from_child(wallet: &ChildWallet) -> Self {
        Self::from_secret(&wallet.secret_bytes())
    }

    /// Keypair from 64 bytes of secret then public key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeypair`] if the length is wrong or the public
    /// half does not belong to the secret half.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: Zeroizing<[u8; 64]> = Zeroizing::new(bytes.try_into().map_err(|_| {
            Error::InvalidKeypair(format!("expected 64 bytes, got {}", bytes.len()))
        })?);
        let signing_key = SigningKey::from_keypair_bytes(&bytes)
            .map_err(|_| Error::InvalidKeypair("public key does not match secret key".into()))?;
        Ok(Self { signing_key })
    }

    /// Keypair from a 64-byte base58 string as exported by browser wallets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeypair`] on malformed base58 or bytes.
    pub fn from_base58_string(s: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            bs58::decode(s.trim())
                .into_vec()
                .map_err(|_| Error::InvalidKeypair("not a base58 string".into()))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Keypair from the JSON byte-array format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if `json` is not an array of bytes, or
    /// [`Error::InvalidKeypair`] if the bytes are not a keypair.
    pub fn from_json(json: &str) -> Result<Self> {
        let bytes: Zeroizing<Vec<u8>> = Zeroizing::new(serde_json::from_str(json)?);
        Self::from_bytes(&bytes)
    }

    /// Read a keypair file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise see
    /// [`Keypair::from_json`].
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = Zeroizing::new(std::fs::read_to_string(path)?);
        let keypair = Self::from_json(&json)?;
        debug!("loaded keypair {} from {}", keypair.pubkey(), path.display());
        Ok(keypair)
    }

    /// Write the keypair file, creating or truncating it.
    ///
    /// On Unix the file is created with mode `0600`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(path)?;
        serde_json::to_writer(&mut file, self.to_bytes().as_slice())?;
        file.flush()?;
        debug!("wrote keypair {} to {}", self.pubkey(), path.display());
        Ok(())
    }

    /// Public address.
    pub fn pubkey(&self) -> Pubkey {
        Pubkey::new(self.signing_key.verifying_key().to_bytes())
    }

    /// The 32-byte secret.
    pub fn secret_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    /// Secret followed by public key.
    pub fn to_bytes(&self) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(self.signing_key.to_keypair_bytes())
    }

    /// 64-byte base58 string, the wallet import format.
    pub fn to_base58_string(&self) -> Zeroizing<String> {
        Zeroizing::new(bs58::encode(self.to_bytes().as_slice()).into_string())
    }

    /// JSON byte array, the keypair file format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<Zeroizing<String>> {
        let mut out = Zeroizing::new(Vec::with_capacity(256));
        serde_json::to_writer(&mut *out, self.to_bytes().as_slice())?;
        String::from_utf8(mem::take(&mut *out))
            .map(Zeroizing::new)
            .map_err(|e| Error::InvalidKeypair(e.utf8_error().to_string()))
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for Keypair {}
