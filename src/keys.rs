//! Private key handling: generation, loading and export.

use crate::address::{Address, AddressConvertible, PrivateKey, PublicKey};
use crate::error::{Error, Result};
use crate::utils::{strip_hex_prefix, to_prefixed_hex};
use rand::rngs::OsRng;
use rand::RngCore;
use rustc_hex::FromHex;
use secp256k1::Secp256k1;
use std::fmt;

/// A secp256k1 key pair able to sign transactions.
///
/// The private scalar is never printed: `Debug` only shows the address.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    secret: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    /// Length of a hex-encoded private key, without prefix.
    pub const HEX_LENGTH: usize = 64;

    pub fn generate() -> Result<Self> {
        //! Create a new random key pair from the operating system RNG.
        Self::generate_with(&mut OsRng)
    }

    pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self> {
        //! Create a new key pair from the given random source.
        //!
        //! Candidates outside `[1, n)` are rejected and redrawn.
        let mut candidate = [0u8; 32];
        loop {
            rng.try_fill_bytes(&mut candidate)
                .map_err(|e| Error::EntropyFailure(e.to_string()))?;
            if let Ok(secret) = PrivateKey::from_slice(&candidate) {
                return Ok(Self::from_private_key(secret));
            }
        }
    }

    pub fn from_hex(text: &str) -> Result<Self> {
        //! Load a private key from its hex form (with or without `0x`).
        let body = strip_hex_prefix(text);
        if body.len() != Self::HEX_LENGTH {
            return Err(Error::InvalidKeyEncoding(format!(
                "expected {} hex characters, got {}",
                Self::HEX_LENGTH,
                body.len()
            )));
        }
        let bytes: Vec<u8> = body
            .from_hex()
            .map_err(|e| Error::InvalidKeyEncoding(e.to_string()))?;
        let secret = PrivateKey::from_slice(&bytes)
            .map_err(|_| Error::InvalidKeyEncoding("scalar out of curve range".to_string()))?;
        Ok(Self::from_private_key(secret))
    }

    pub fn from_private_key(secret: PrivateKey) -> Self {
        //! Wrap an already validated private key.
        let public = secret.public_key(&Secp256k1::signing_only());
        Self { secret, public }
    }

    pub const fn private_key(&self) -> &PrivateKey {
        //! Underlying private key.
        &self.secret
    }

    pub const fn public_key(&self) -> &PublicKey {
        //! Public point derived from the private key.
        &self.public
    }

    pub fn private_key_hex(&self) -> String {
        //! Export the private key as `0x`-prefixed hex.
        //!
        //! Treat the result as a password: whoever holds it controls the account.
        to_prefixed_hex(self.secret.secret_bytes())
    }
}

impl AddressConvertible for KeyPair {
    fn address(&self) -> Address {
        self.public.address()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
