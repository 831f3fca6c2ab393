//! Legacy Ethereum transactions support.
//!
//! A [`Transaction`] is signed for a specific chain with
//! [`Transaction::sign`], producing a [`SignedTransaction`] that can be
//! serialized for broadcast and parsed back.

use crate::address::{Address, AddressConvertible};
use crate::error::{Error, Result};
use crate::keys::KeyPair;
use crate::rlp::{AsBytes, Bytes, BytesMut, Decodable, Encodable, RLPError};
use crate::signature::{validate_chain_id, Signature};
use crate::utils::{decode_hex, keccak, to_prefixed_hex};
use crate::{rlp_encodable, U256};
use secp256k1::{Message, Secp256k1};
use tracing::debug;

#[cfg(feature = "serde")]
use crate::utils::unhex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Base cost of a transaction with a recipient.
pub const TX_GAS: u64 = 21_000;
/// Base cost of a contract creation transaction.
pub const TX_GAS_CONTRACT_CREATION: u64 = 53_000;
/// Cost of every zero byte of transaction data.
pub const TX_DATA_ZERO_GAS: u64 = 4;
/// Cost of every non-zero byte of transaction data.
pub const TX_DATA_NON_ZERO_GAS: u64 = 16;

rlp_encodable! {
    /// Represents a single unsigned legacy transaction.
    ///
    /// Encodes as the 6-field list `[nonce, gasPrice, gasLimit, to, value, data]`.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Transaction {
        /// Sender account nonce.
        pub nonce: u64,
        /// Price per unit of gas, in wei.
        pub gas_price: U256,
        /// Maximal amount of gas to spend for transaction.
        pub gas_limit: u64,
        /// Recipient, `None` for contract creation.
        pub to: Option<Address> => AsBytes<Address>,
        /// Amount to transfer, in wei.
        pub value: U256,
        /// Call data or contract code.
        #[cfg_attr(feature = "serde", serde(with = "serde_with::As::<unhex::Hex>"))]
        pub data: Bytes,
    }
}

rlp_encodable! {
    /// Flat 9-field list shared by the signing preimage and the signed form.
    #[derive(Clone, Debug, Eq, PartialEq)]
    struct TransactionFields {
        nonce: u64,
        gas_price: U256,
        gas_limit: u64,
        to: Option<Address> => AsBytes<Address>,
        value: U256,
        data: Bytes,
        v: u64,
        r: U256,
        s: U256,
    }
}

impl TransactionFields {
    fn new(transaction: &Transaction, v: u64, r: U256, s: U256) -> Self {
        Self {
            nonce: transaction.nonce,
            gas_price: transaction.gas_price,
            gas_limit: transaction.gas_limit,
            to: transaction.to,
            value: transaction.value,
            data: transaction.data.clone(),
            v,
            r,
            s,
        }
    }

    fn split(self) -> (Transaction, Signature) {
        (
            Transaction {
                nonce: self.nonce,
                gas_price: self.gas_price,
                gas_limit: self.gas_limit,
                to: self.to,
                value: self.value,
                data: self.data,
            },
            Signature {
                v: self.v,
                r: self.r,
                s: self.s,
            },
        )
    }
}

fn encode_to_bytes<T: Encodable>(item: &T) -> Bytes {
    let mut buf = BytesMut::new();
    item.encode(&mut buf);
    buf.freeze()
}

impl Transaction {
    pub fn new(
        nonce: u64,
        to: Option<Address>,
        value: U256,
        gas_limit: u64,
        gas_price: U256,
        data: Bytes,
    ) -> Result<Self> {
        //! Create an unsigned transaction.
        //!
        //! A plain transfer (recipient set, no data) must carry at least
        //! [`TX_GAS`]; otherwise [`Error::GasLimitTooLow`] is returned.
        //! Calls and contract creations are not checked here.
        if to.is_some() && data.is_empty() && gas_limit < TX_GAS {
            return Err(Error::GasLimitTooLow {
                required: TX_GAS,
                got: gas_limit,
            });
        }
        Ok(Self {
            nonce,
            gas_price,
            gas_limit,
            to,
            value,
            data,
        })
    }

    pub const fn is_contract_creation(&self) -> bool {
        //! Whether this transaction deploys a contract.
        self.to.is_none()
    }

    pub fn intrinsic_gas(&self) -> u64 {
        //! Minimal gas this transaction needs before any code executes.
        let base = if self.is_contract_creation() {
            TX_GAS_CONTRACT_CREATION
        } else {
            TX_GAS
        };
        self.data.iter().fold(base, |total, &byte| {
            total.saturating_add(if byte == 0 {
                TX_DATA_ZERO_GAS
            } else {
                TX_DATA_NON_ZERO_GAS
            })
        })
    }

    pub fn encode_unsigned(&self, chain_id: u64) -> Bytes {
        //! RLP preimage for replay-protected signing:
        //! `[nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0]`.
        encode_to_bytes(&TransactionFields::new(
            self,
            chain_id,
            U256::ZERO,
            U256::ZERO,
        ))
    }

    pub fn signing_hash(&self, chain_id: u64) -> Result<[u8; 32]> {
        //! Hash to sign for the given chain.
        validate_chain_id(chain_id)?;
        Ok(keccak(self.encode_unsigned(chain_id)))
    }

    fn legacy_signing_hash(&self) -> [u8; 32] {
        keccak(encode_to_bytes(self))
    }

    pub fn sign(&self, key: &KeyPair, chain_id: u64) -> Result<SignedTransaction> {
        //! Sign this transaction for `chain_id`.
        //!
        //! Nonces are deterministic (RFC 6979), so signing the same
        //! transaction twice yields identical bytes.
        let hash = self.signing_hash(chain_id)?;
        let message = Message::from_slice(&hash)?;
        let recoverable =
            Secp256k1::signing_only().sign_ecdsa_recoverable(&message, key.private_key());
        let signature = Signature::from_recoverable(&recoverable, chain_id)?;
        debug!(
            nonce = self.nonce,
            chain_id,
            v = signature.v,
            "signed transaction"
        );
        Ok(SignedTransaction {
            transaction: self.clone(),
            signature,
        })
    }
}

/// A transaction together with its signature.
///
/// Fields are private: a value of this type always carries a `v` that one
/// of the supported schemes can produce.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SignedParts"))]
pub struct SignedTransaction {
    transaction: Transaction,
    signature: Signature,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct SignedParts {
    transaction: Transaction,
    signature: Signature,
}

#[cfg(feature = "serde")]
impl TryFrom<SignedParts> for SignedTransaction {
    type Error = Error;

    fn try_from(parts: SignedParts) -> Result<Self> {
        Self::new(parts.transaction, parts.signature)
    }
}

impl SignedTransaction {
    pub fn new(transaction: Transaction, signature: Signature) -> Result<Self> {
        //! Combine a transaction with an externally produced signature.
        //!
        //! The signature is not verified here, only its `v` is checked.
        signature.recovery_id()?;
        Ok(Self {
            transaction,
            signature,
        })
    }

    pub const fn transaction(&self) -> &Transaction {
        //! Signed transaction body.
        &self.transaction
    }

    pub const fn signature(&self) -> &Signature {
        //! Transaction signature.
        &self.signature
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        //! Parse a signed transaction from its wire form.
        //!
        //! The input must contain exactly one canonical 9-field list.
        let mut buf = bytes;
        let fields = TransactionFields::decode(&mut buf)?;
        if !buf.is_empty() {
            return Err(RLPError::Custom("trailing bytes after transaction").into());
        }
        let (transaction, signature) = fields.split();
        debug!(
            nonce = transaction.nonce,
            v = signature.v,
            "parsed signed transaction"
        );
        Self::new(transaction, signature)
    }

    pub fn to_broadcastable_bytes(&self) -> Bytes {
        //! Serialize to the form accepted by `eth_sendRawTransaction`.
        encode_to_bytes(&TransactionFields::new(
            &self.transaction,
            self.signature.v,
            self.signature.r,
            self.signature.s,
        ))
    }

    pub fn hash(&self) -> [u8; 32] {
        //! Transaction id: hash of the broadcastable bytes.
        keccak(self.to_broadcastable_bytes())
    }

    pub fn to_hex(&self) -> String {
        //! Broadcastable bytes as `0x`-prefixed hex.
        to_prefixed_hex(self.to_broadcastable_bytes())
    }

    pub fn from_hex(text: &str) -> Result<Self> {
        //! Parse a raw transaction from hex (with or without `0x`).
        let bytes = decode_hex(text).map_err(|_| RLPError::Custom("invalid hex"))?;
        Self::parse(&bytes)
    }

    pub fn recover_sender(&self, chain_id: u64) -> Result<Address> {
        //! Recover the address that signed this transaction.
        //!
        //! A replay-protected signature must be bound to `chain_id`.
        //! Signatures without replay protection are checked against the
        //! unprotected preimage and accepted for any chain.
        validate_chain_id(chain_id)?;
        let hash = match self.signature.chain_id() {
            Some(encoded) if encoded == chain_id => self.transaction.signing_hash(chain_id)?,
            Some(encoded) => {
                return Err(Error::InvalidSignature(format!(
                    "signed for chain {encoded}, expected {chain_id}"
                )))
            }
            None => self.transaction.legacy_signing_hash(),
        };
        Ok(self.signature.recover(&hash)?.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer() -> Transaction {
        Transaction::new(
            9,
            Some(Address::from([0x35; 20])),
            U256::from(1_000_000_000_000_000_000u64),
            21_000,
            U256::from(20_000_000_000u64),
            Bytes::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_checks_transfer_gas() {
        let to = Some(Address::from([0x35; 20]));
        assert_eq!(
            Transaction::new(0, to, U256::ZERO, 20_999, U256::ZERO, Bytes::new()).unwrap_err(),
            Error::GasLimitTooLow {
                required: TX_GAS,
                got: 20_999
            }
        );
        assert!(Transaction::new(0, to, U256::ZERO, 21_000, U256::ZERO, Bytes::new()).is_ok());
        // Calls and deployments are left to the caller.
        let data = Bytes::from_static(&[0xa9, 0x05, 0x9c, 0xbb]);
        assert!(Transaction::new(0, to, U256::ZERO, 0, U256::ZERO, data.clone()).is_ok());
        assert!(Transaction::new(0, None, U256::ZERO, 0, U256::ZERO, data).is_ok());
    }

    #[test]
    fn test_intrinsic_gas() {
        assert_eq!(transfer().intrinsic_gas(), 21_000);
        let call = Transaction {
            data: Bytes::from_static(b"\x00\x00\x00\x60\x60\x60"),
            ..transfer()
        };
        assert_eq!(call.intrinsic_gas(), 21_000 + 3 * 4 + 3 * 16);
        let create = Transaction {
            to: None,
            data: Bytes::new(),
            ..transfer()
        };
        assert_eq!(create.intrinsic_gas(), 53_000);
    }

    #[test]
    fn test_unsigned_preimage_layout() {
        let preimage = transfer().encode_unsigned(1);
        // chain id, then two empty strings for r and s.
        assert_eq!(&preimage[preimage.len() - 3..], &[0x01, 0x80, 0x80]);
    }

    #[test]
    fn test_signing_hash_rejects_zero_chain() {
        assert_eq!(
            transfer().signing_hash(0).unwrap_err(),
            Error::InvalidChainId(0)
        );
    }

    #[test]
    fn test_fields_split_roundtrip() {
        let tx = transfer();
        let fields = TransactionFields::new(&tx, 37, U256::from(1), U256::from(2));
        let (back, signature) = fields.split();
        assert_eq!(back, tx);
        assert_eq!(signature.v, 37);
        assert_eq!(signature.s, U256::from(2));
    }

    #[test]
    fn test_parse_rejects_trailing_bytes() {
        let key = KeyPair::from_hex(&"46".repeat(32)).unwrap();
        let mut raw = transfer().sign(&key, 1).unwrap().to_broadcastable_bytes().to_vec();
        raw.push(0x00);
        assert_eq!(
            SignedTransaction::parse(&raw).unwrap_err(),
            Error::MalformedEncoding(RLPError::Custom("trailing bytes after transaction"))
        );
    }

    #[test]
    fn test_new_rejects_bad_v() {
        let signature = Signature {
            v: 30,
            r: U256::from(1),
            s: U256::from(1),
        };
        assert!(matches!(
            SignedTransaction::new(transfer(), signature),
            Err(Error::InvalidSignature(_))
        ));
    }
}
