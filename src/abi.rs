//! Minimal ABI encoding for contract calls.
//!
//! Call data is the 4-byte method selector followed by one 32-byte word per
//! argument. Only static `address` and `uint256` parameters are supported,
//! which is enough for ERC-20 transfers and approvals.
//!
//! ```rust
//! use eth_txkit::abi::{build_call_data, AbiArg};
//! use eth_txkit::{Address, U256};
//!
//! let to: Address = "0x35bb6eF95c72bf4804334BB9d6A3c77Bef18d81B".parse().unwrap();
//! let data = build_call_data(
//!     "transfer(address,uint256)",
//!     &[AbiArg::Address(to), AbiArg::Uint(U256::from(1000))],
//! )
//! .unwrap();
//! assert_eq!(data.len(), 4 + 2 * 32);
//! assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
//! ```

use crate::address::Address;
use crate::error::{Error, Result};
use crate::rlp::{static_left_pad, Bytes, BytesMut};
use crate::utils::keccak;
use crate::U256;

/// A single 32-byte ABI word.
pub type Word = [u8; 32];

/// Size of a method selector in bytes.
pub const SELECTOR_SIZE: usize = 4;

/// A call argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AbiArg {
    /// `address` parameter.
    Address(Address),
    /// `uint256` parameter.
    Uint(U256),
}

impl AbiArg {
    pub const fn type_name(&self) -> &'static str {
        //! Canonical ABI type name of this argument.
        match self {
            Self::Address(_) => "address",
            Self::Uint(_) => "uint256",
        }
    }

    pub fn encode(&self) -> Word {
        //! Encode as a single ABI word.
        match self {
            Self::Address(address) => encode_address_arg(address),
            Self::Uint(value) => encode_uint_arg(*value),
        }
    }
}

impl From<Address> for AbiArg {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}
impl From<U256> for AbiArg {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

pub fn method_selector(signature: &str) -> [u8; SELECTOR_SIZE] {
    //! Compute a method selector: the first 4 bytes of `keccak(signature)`.
    //!
    //! `signature` must be canonical: `name(type1,type2)`, without spaces,
    //! parameter names or return types.
    let hash = keccak(signature);
    let mut selector = [0u8; SELECTOR_SIZE];
    selector.copy_from_slice(&hash[..SELECTOR_SIZE]);
    selector
}

pub fn encode_address_arg(address: &Address) -> Word {
    //! Left-pad the address with 12 zero bytes.
    let mut word = [0u8; 32];
    word[32 - Address::WIDTH..].copy_from_slice(address.as_bytes());
    word
}

pub fn encode_uint_arg(value: U256) -> Word {
    //! Big-endian representation, left-padded to 32 bytes.
    value.to_be_bytes::<32>()
}

pub fn encode_uint_bytes(big_endian: &[u8]) -> Result<Word> {
    //! Left-pad an arbitrary-length big-endian integer to 32 bytes.
    //!
    //! Leading zero bytes are ignored; more than 32 significant bytes
    //! is an [`Error::ArgumentOverflow`].
    static_left_pad::<32>(big_endian).map_err(Error::ArgumentOverflow)
}

fn parse_parameters(signature: &str) -> Result<Vec<&str>> {
    let open = signature
        .find('(')
        .ok_or_else(|| Error::AbiSignature(format!("missing '(' in {signature:?}")))?;
    let params = signature[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| Error::AbiSignature(format!("missing trailing ')' in {signature:?}")))?;
    let name = &signature[..open];
    if name.is_empty() || signature.contains(char::is_whitespace) {
        return Err(Error::AbiSignature(format!(
            "{signature:?} is not a canonical function signature"
        )));
    }
    if params.is_empty() {
        return Ok(vec![]);
    }
    Ok(params.split(',').collect())
}

pub fn encode_call(selector: [u8; SELECTOR_SIZE], args: &[AbiArg]) -> Bytes {
    //! Concatenate a selector and encoded arguments without any validation.
    let mut data = BytesMut::with_capacity(SELECTOR_SIZE + 32 * args.len());
    data.extend_from_slice(&selector);
    for arg in args {
        data.extend_from_slice(&arg.encode());
    }
    data.freeze()
}

pub fn build_call_data(signature: &str, args: &[AbiArg]) -> Result<Bytes> {
    //! Build call data: selector followed by the encoded arguments.
    //!
    //! Arguments must match the parameter list of `signature` in count,
    //! order and kind.
    let params = parse_parameters(signature)?;
    if params.len() != args.len() {
        return Err(Error::AbiSignature(format!(
            "{signature} expects {} arguments, got {}",
            params.len(),
            args.len()
        )));
    }
    for (index, (param, arg)) in params.iter().zip(args).enumerate() {
        if *param != arg.type_name() {
            return Err(Error::AbiSignature(format!(
                "argument {index} of {signature} is {param}, got {}",
                arg.type_name()
            )));
        }
    }
    Ok(encode_call(method_selector(signature), args))
}

/// ERC-20 token call data.
pub mod erc20 {
    use super::{encode_call, method_selector};
    use crate::address::Address;
    use crate::rlp::Bytes;
    use crate::U256;

    /// `transfer(address,uint256)`, selector `0xa9059cbb`.
    pub const TRANSFER: &str = "transfer(address,uint256)";
    /// `approve(address,uint256)`, selector `0x095ea7b3`.
    pub const APPROVE: &str = "approve(address,uint256)";
    /// `balanceOf(address)`, selector `0x70a08231`.
    pub const BALANCE_OF: &str = "balanceOf(address)";

    pub fn transfer(to: Address, amount: U256) -> Bytes {
        //! Call data to move `amount` tokens to `to`.
        encode_call(method_selector(TRANSFER), &[to.into(), amount.into()])
    }

    pub fn approve(spender: Address, amount: U256) -> Bytes {
        //! Call data to let `spender` withdraw up to `amount` tokens.
        encode_call(method_selector(APPROVE), &[spender.into(), amount.into()])
    }

    pub fn balance_of(owner: Address) -> Bytes {
        //! Call data for the `balanceOf` view.
        encode_call(method_selector(BALANCE_OF), &[owner.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors() {
        assert_eq!(method_selector(erc20::TRANSFER), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(method_selector(erc20::APPROVE), [0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(method_selector(erc20::BALANCE_OF), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_encode_address_param() {
        let mut raw = [0u8; 20];
        raw[0] = 0xde;
        raw[19] = 0xad;

        let word = encode_address_arg(&Address::from(raw));

        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(&word[12..], &raw);
    }

    #[test]
    fn test_encode_uint_bytes() {
        assert_eq!(encode_uint_bytes(&[]).unwrap(), [0u8; 32]);
        let mut expected = [0u8; 32];
        expected[30] = 0x03;
        expected[31] = 0xe8;
        assert_eq!(encode_uint_bytes(&[0x03, 0xe8]).unwrap(), expected);
        assert_eq!(encode_uint_bytes(&[0, 0, 0x03, 0xe8]).unwrap(), expected);
        assert_eq!(
            encode_uint_bytes(&[1u8; 33]).unwrap_err(),
            Error::ArgumentOverflow(33)
        );
        // Zero padding beyond 32 bytes is fine.
        let mut padded = vec![0u8; 8];
        padded.extend_from_slice(&[0xff; 32]);
        assert_eq!(encode_uint_bytes(&padded).unwrap(), [0xff; 32]);
    }

    #[test]
    fn test_uint_matches_bytes() {
        let value = U256::from(0x03e8u64);
        assert_eq!(
            encode_uint_arg(value),
            encode_uint_bytes(&[0x03, 0xe8]).unwrap()
        );
        assert_eq!(encode_uint_arg(U256::MAX), [0xff; 32]);
    }

    #[test]
    fn test_parse_parameters() {
        assert_eq!(parse_parameters("foo()").unwrap(), Vec::<&str>::new());
        assert_eq!(
            parse_parameters("transfer(address,uint256)").unwrap(),
            vec!["address", "uint256"]
        );
        assert!(parse_parameters("transfer").is_err());
        assert!(parse_parameters("transfer(address").is_err());
        assert!(parse_parameters("(address)").is_err());
        assert!(parse_parameters("transfer(address, uint256)").is_err());
    }

    #[test]
    fn test_build_call_data_selector_only() {
        let data = build_call_data("totalSupply()", &[]).unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(&data[..], &method_selector("totalSupply()"));
    }

    #[test]
    fn test_build_call_data_rejects_mismatch() {
        let addr = Address::ZERO;
        assert!(matches!(
            build_call_data(erc20::TRANSFER, &[addr.into()]),
            Err(Error::AbiSignature(_))
        ));
        assert!(matches!(
            build_call_data(erc20::TRANSFER, &[U256::from(1).into(), addr.into()]),
            Err(Error::AbiSignature(_))
        ));
        assert!(matches!(
            build_call_data("setItem(bytes32,bytes32)", &[U256::ZERO.into(), U256::ZERO.into()]),
            Err(Error::AbiSignature(_))
        ));
    }

    #[test]
    fn test_erc20_matches_validated_encoding() {
        let to = Address::from([0x22; 20]);
        let amount = U256::from(1_000_000u64);
        assert_eq!(
            erc20::transfer(to, amount),
            build_call_data(erc20::TRANSFER, &[to.into(), amount.into()]).unwrap()
        );
    }

    #[test]
    fn test_erc20_helpers() {
        let owner = Address::from([0x11; 20]);
        let data = erc20::balance_of(owner);
        assert_eq!(data.len(), 36);
        assert_eq!(&data[4..], &encode_address_arg(&owner));

        let data = erc20::approve(owner, U256::from(5));
        assert_eq!(&data[..4], &[0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(data[67], 5);
    }
}
