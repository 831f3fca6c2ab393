//! This module enables RLP encoding of high-level objects.
//!
//! RLP (recursive length prefix) is the canonical serialization used by
//! Ethereum for transactions. It only knows two kinds of items:
//!
//! - Byte string ([`Bytes`]) or
//! - Sequence of items ([`Vec`], fixed array or slice).
//!
//! Encoding algorithm
//! ******************
//!
//! 1. A single byte in `0x00..=0x7F` is its own encoding.
//! 1. A byte string of length `< 0x38` is prefixed with `0x80 + len`.
//!    Longer strings get `0xB7 + len(len)` followed by the big-endian length.
//! 1. A list is the concatenation of its encoded items, prefixed with
//!    `0xC0 + len` (or `0xF7 + len(len)` and the length for long payloads).
//!
//! Integers are encoded as their minimal big-endian byte string, so zero
//! becomes the empty string `0x80`.
//!
//! | ``x``             |       ``rlp_encode(x)``        |
//! |-------------------|--------------------------------|
//! | ``b''``           | ``0x80``                       |
//! | ``b'\x0F'``       | ``0x0F``                       |
//! | ``b'\x80'``       | ``0x81 0x80``                  |
//! | ``b'foo'``        | ``0x83 0x66 0x6F 0x6F``        |
//! | ``[]``            | ``0xC0``                       |
//! | ``[[], [[]]]``    | ``0xC3 0xC0 0xC1 0xC0``        |
//!
//! Serialization
//! *************
//!
//! Primitive items are handled by [`alloy-rlp`](https://docs.rs/crate/alloy-rlp/latest/)
//! through its [`Encodable`] and [`Decodable`] traits. Flat structs that map to a
//! single RLP list are declared with the [`rlp_encodable`](crate::rlp_encodable)
//! macro, which allows a field to be serialized through another type:
//!
//! ```rust
//! use eth_txkit::rlp::{AsBytes, Bytes, Decodable, Encodable};
//! use eth_txkit::{rlp_encodable, Address, U256};
//!
//! rlp_encodable! {
//!     #[derive(Clone, Debug, Eq, PartialEq)]
//!     pub struct Call {
//!         pub to: Option<Address> => AsBytes<Address>,
//!         pub value: U256,
//!         pub data: Bytes,
//!     }
//! }
//!
//! let call = Call { to: None, value: U256::from(1), data: Bytes::new() };
//! let mut buf = vec![];
//! call.encode(&mut buf);
//! assert_eq!(buf, [0xC3, 0x80, 0x01, 0x80]);
//! assert_eq!(Call::decode(&mut &buf[..]).unwrap(), call);
//! ```
//!
//! [`Option`] is not RLP-serializable on its own; [`AsBytes<T>`] writes `Some(T)`
//! as `T` and [`None`] as an empty byte string.
//!
//! Decoding is strict: the list header must describe exactly the bytes
//! consumed by the fields, otherwise decoding fails instead of silently
//! ignoring extra or missing items.

pub use alloy_rlp::{Decodable, Encodable, Error as RLPError, Header};
pub use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Convenience alias for a result of fallible RLP decoding.
pub type RLPResult<T> = Result<T, RLPError>;

#[doc(hidden)]
#[macro_export]
macro_rules! __encode_as {
    ($out:expr, $field:expr) => {
        $field.encode($out);
    };
    ($out:expr, $field:expr => $cast:ty) => {
        <$cast>::from($field.clone()).encode($out);
    };

    ($out:expr, $field:expr $(=> $cast:ty)?, $($fields:expr $(=> $casts:ty)?),+) => {
        $crate::__encode_as! { $out, $field $(=> $cast)? }
        $crate::__encode_as! { $out, $($fields $(=> $casts)?),+ }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __decode_as {
    ($buf:expr, $field:ty) => {
        <$field>::decode($buf)?
    };
    ($buf:expr, $field:ty => $cast:ty) => {
        <$field>::from(<$cast>::decode($buf)?)
    };
}

/// Create an RLP-encodable struct by specifying types to cast to.
#[macro_export]
macro_rules! rlp_encodable {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_attr:meta])*
                $field_vis:vis $field_name:ident: $field_type:ty $(=> $cast:ty)?,
            )*
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $(
                $(#[$field_attr])*
                $field_vis $field_name: $field_type,
            )*
        }

        impl $name {
            fn encode_internal(&self, out: &mut dyn $crate::rlp::BufMut) {
                use $crate::rlp::Encodable;
                $crate::__encode_as!(out, $(self.$field_name $(=> $cast)?),+);
            }
        }

        impl $crate::rlp::Encodable for $name {
            fn encode(&self, out: &mut dyn $crate::rlp::BufMut) {
                let mut buf = $crate::rlp::BytesMut::new();
                self.encode_internal(&mut buf);
                $crate::rlp::Header {
                    list: true,
                    payload_length: buf.len()
                }.encode(out);
                out.put_slice(&buf)
            }
        }

        impl $crate::rlp::Decodable for $name {
            fn decode(buf: &mut &[u8]) -> $crate::rlp::RLPResult<Self> {
                #[allow(unused_imports)]
                use $crate::rlp::Decodable;
                let header = $crate::rlp::Header::decode(buf)?;
                if !header.list {
                    return Err($crate::rlp::RLPError::UnexpectedString);
                }
                if buf.len() < header.payload_length {
                    return Err($crate::rlp::RLPError::InputTooShort);
                }
                let input: &[u8] = *buf;
                let (payload, rest) = input.split_at(header.payload_length);
                let mut items: &[u8] = payload;
                let decoded = Self {
                    $($field_name: $crate::__decode_as!(&mut items, $field_type $(=> $cast)?)),*
                };
                if !items.is_empty() {
                    return Err($crate::rlp::RLPError::ListLengthMismatch {
                        expected: header.payload_length - items.len(),
                        got: header.payload_length,
                    });
                }
                *buf = rest;
                Ok(decoded)
            }
        }
    }
}

/// Serialization wrapper for `Option` to serialize `None` as empty `Bytes`.
///
/// <div class="warning">
///  Do not use it directly: it is only intended for use with `rlp_encodable!` macro.
/// </div>
#[allow(clippy::manual_non_exhaustive)]
pub enum AsBytes<T: Encodable + Decodable> {
    #[doc(hidden)]
    Just(T),
    #[doc(hidden)]
    Nothing,
}

impl<T: Encodable + Decodable, S: Into<T>> From<Option<S>> for AsBytes<T> {
    fn from(value: Option<S>) -> Self {
        match value {
            Some(v) => Self::Just(v.into()),
            None => Self::Nothing,
        }
    }
}
impl<T: Encodable + Decodable> From<AsBytes<T>> for Option<T> {
    fn from(value: AsBytes<T>) -> Self {
        match value {
            AsBytes::Just(v) => Self::Some(v),
            AsBytes::Nothing => Self::None,
        }
    }
}

impl<T: Encodable + Decodable> Encodable for AsBytes<T> {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Just(value) => value.encode(out),
            Self::Nothing => Bytes::new().encode(out),
        }
    }
}
impl<T: Encodable + Decodable> Decodable for AsBytes<T> {
    fn decode(buf: &mut &[u8]) -> RLPResult<Self> {
        match buf.first() {
            None => Err(RLPError::InputTooShort),
            Some(&alloy_rlp::EMPTY_STRING_CODE) => {
                buf.advance(1);
                Ok(Self::Nothing)
            }
            Some(_) => Ok(Self::Just(T::decode(buf)?)),
        }
    }
}

#[inline]
pub(crate) fn static_left_pad<const N: usize>(data: &[u8]) -> Result<[u8; N], usize> {
    //! Left-pad a big-endian byte string with zeros to `N` bytes.
    //!
    //! Leading zero bytes of the input are ignored. Returns the significant
    //! length as error if it exceeds `N`.
    let significant: &[u8] = match data.iter().position(|&b| b != 0) {
        Some(start) => &data[start..],
        None => &[],
    };
    if significant.len() > N {
        return Err(significant.len());
    }

    let mut v = [0; N];
    v[N - significant.len()..].copy_from_slice(significant);
    Ok(v)
}
