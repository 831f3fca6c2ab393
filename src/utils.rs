use rustc_hex::{FromHex, FromHexError, ToHex};
use tiny_keccak::{Hasher, Keccak};

pub fn keccak<S: AsRef<[u8]>>(bytes: S) -> [u8; 32] {
    //! Compute Keccak-256 hash.
    //!
    //! This is the original Keccak padding used by Ethereum, which
    //! differs from the standardized SHA3-256.
    let mut hasher = Keccak::v256();
    hasher.update(bytes.as_ref());
    let mut hash = [0u8; 32];
    hasher.finalize(&mut hash);
    hash
}

#[inline]
pub(crate) fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

pub(crate) fn decode_hex(text: &str) -> Result<Vec<u8>, FromHexError> {
    strip_hex_prefix(text).from_hex()
}

pub(crate) fn to_prefixed_hex<S: AsRef<[u8]>>(bytes: S) -> String {
    format!("0x{}", bytes.as_ref().to_hex::<String>())
}

#[cfg(feature = "serde")]
pub(crate) mod unhex {
    use crate::rlp::Bytes;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use serde_with::{DeserializeAs, SerializeAs};

    /// Serialize bytes as a `0x`-prefixed lowercase hex string.
    pub(crate) struct Hex;

    impl SerializeAs<Bytes> for Hex {
        fn serialize_as<S>(source: &Bytes, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&super::to_prefixed_hex(source))
        }
    }

    impl<'de> DeserializeAs<'de, Bytes> for Hex {
        fn deserialize_as<D>(deserializer: D) -> Result<Bytes, D::Error>
        where
            D: Deserializer<'de>,
        {
            let text = String::deserialize(deserializer)?;
            super::decode_hex(&text)
                .map(Bytes::from)
                .map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_empty() {
        assert_eq!(
            to_prefixed_hex(keccak(b"")),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak_selector_source() {
        assert_eq!(
            &keccak("transfer(address,uint256)")[..4],
            &[0xa9u8, 0x05, 0x9c, 0xbb]
        );
    }

    #[test]
    fn test_hex_prefix_handling() {
        assert_eq!(decode_hex("0x0aff").unwrap(), vec![0x0a, 0xff]);
        assert_eq!(decode_hex("0X0AFF").unwrap(), vec![0x0a, 0xff]);
        assert_eq!(decode_hex("0aff").unwrap(), vec![0x0a, 0xff]);
        assert!(decode_hex("0xzz").is_err());
        assert_eq!(to_prefixed_hex([0xdeu8, 0xad]), "0xdead");
        assert_eq!(to_prefixed_hex([0u8; 0]), "0x");
    }
}
