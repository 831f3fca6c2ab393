//! Ethereum address operations and verifications.

use crate::rlp::{Bytes, Decodable, Encodable, RLPError};
use crate::utils::{keccak, strip_hex_prefix, to_prefixed_hex};
use rustc_hex::FromHex;
pub use secp256k1::{PublicKey, SecretKey as PrivateKey};
use std::{fmt, ops::Deref, result::Result, str::FromStr};
use thiserror::Error;

/// Ethereum address: the last 20 bytes of a public key hash.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

/// Address parsing errors.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AddressValidationError {
    /// Input is not `0x` followed by 40 hex characters.
    #[error("expected 40 hex characters, got {0}")]
    InvalidLength(usize),
    /// Input contains non-hex characters.
    #[error("address contains non-hex characters")]
    InvalidHex,
}

impl Deref for Address {
    type Target = [u8; 20];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}
impl From<Address> for [u8; 20] {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl Encodable for Address {
    fn encode(&self, out: &mut dyn crate::rlp::BufMut) {
        self.0[..].encode(out)
    }
}
impl Decodable for Address {
    fn decode(buf: &mut &[u8]) -> Result<Self, RLPError> {
        let bytes = Bytes::decode(buf)?;
        let raw: [u8; Self::WIDTH] =
            bytes[..]
                .try_into()
                .map_err(|_| RLPError::ListLengthMismatch {
                    expected: Self::WIDTH,
                    got: bytes.len(),
                })?;
        Ok(Self(raw))
    }
}

impl FromStr for Address {
    type Err = AddressValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = strip_hex_prefix(s);
        if body.len() != 2 * Self::WIDTH {
            return Err(AddressValidationError::InvalidLength(body.len()));
        }
        let bytes: Vec<u8> = body
            .from_hex()
            .map_err(|_| AddressValidationError::InvalidHex)?;
        let mut raw = [0u8; Self::WIDTH];
        raw.copy_from_slice(&bytes);
        Ok(Self(raw))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Address {
    /// Size of underlying array in bytes.
    pub const WIDTH: usize = 20;

    /// The all-zero address.
    pub const ZERO: Self = Self([0; 20]);

    pub fn from_uncompressed(point: &[u8; 64]) -> Self {
        //! Derive an address from an uncompressed public point
        //! (`x ‖ y`, without the `0x04` prefix).
        let hash = keccak(point);
        let mut raw = [0u8; Self::WIDTH];
        raw.copy_from_slice(&hash[32 - Self::WIDTH..]);
        Self(raw)
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        //! Raw address bytes.
        &self.0
    }

    pub fn to_hex(&self) -> String {
        //! Encode as a lowercase hex string with `0x` prefix.
        to_prefixed_hex(self.0)
    }

    pub fn to_checksum_address(&self) -> String {
        //! Create an EIP-55 checksum address

        let body = self.to_hex();
        let hash = keccak(&body[2..42]);

        "0x".chars()
            .chain(
                body.chars()
                    .skip(2)
                    .zip(itertools::interleave(
                        hash.iter().map(|x| x >> 4),
                        hash.iter().map(|x| x & 15),
                    ))
                    .map(|(ch, h)| if h >= 8 { ch.to_ascii_uppercase() } else { ch }),
            )
            .collect()
    }
}

/// A trait for objects that can generate an on-chain address.
pub trait AddressConvertible {
    /// Create an address
    fn address(&self) -> Address;
}

impl AddressConvertible for PublicKey {
    fn address(&self) -> Address {
        //! Generate address from public key.
        let uncompressed = self.serialize_uncompressed();
        let mut point = [0u8; 64];
        // Get rid of the 0x04 (first byte) at the beginning.
        point.copy_from_slice(&uncompressed[1..]);
        Address::from_uncompressed(&point)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
