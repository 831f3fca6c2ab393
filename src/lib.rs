#![doc(html_root_url = "https://docs.rs/eth-txkit/0.1.0")]
#![warn(rust_2018_idioms, missing_docs)]
#![warn(dead_code, unused_imports, unused_mut)]

//! Rust library to aid coding with Ethereum legacy transactions: keys and
//! addresses, EIP-155 signing and sender recovery, canonical RLP encoding
//! and ERC-20 call data.
//!
//! This library acts primary as a thin layer over several underlying
//! libraries: `secp256k1` for signatures, `tiny-keccak` for hashing and
//! `alloy-rlp` for the wire format.
//!
//! ## Usage
//!
//! One of possible use cases can be transaction creation and signing.
//!
//! Let's transfer 1 ether to another account on a local development chain.
//! To do so, we need to create a transaction, sign it for the chain and
//! encode it into broadcastable bytes.
//!
//! ```rust
//! use eth_txkit::network::DEV_CHAIN_ID;
//! use eth_txkit::rlp::Bytes;
//! use eth_txkit::transactions::{SignedTransaction, Transaction};
//! use eth_txkit::{AddressConvertible, KeyPair, U256};
//!
//! let key = KeyPair::from_hex(
//!     "0xf1b3f8e0d52caec13491368449ab8d90f3d222a3e485aa7f02591bbceb5efba5",
//! )
//! .expect("Valid key");
//! let transaction = Transaction::new(
//!     0,
//!     Some("0x68dB32D26d9529B2a142927c6f1af248fc6Ba7e9".parse().unwrap()),
//!     U256::from(1_000_000_000_000_000_000u64),
//!     21_000,
//!     U256::from(30_000_000_000u64),
//!     Bytes::new(),
//! )
//! .expect("Enough gas for a transfer");
//! let signed = transaction.sign(&key, DEV_CHAIN_ID).expect("Valid chain id");
//! let raw = signed.to_broadcastable_bytes();
//!
//! let parsed = SignedTransaction::parse(&raw).expect("Just encoded");
//! assert_eq!(parsed, signed);
//! assert_eq!(parsed.recover_sender(DEV_CHAIN_ID).unwrap(), key.address());
//! ```
//!
//! Token transfers carry ABI-encoded call data instead of value:
//!
//! ```rust
//! use eth_txkit::abi::erc20;
//! use eth_txkit::{Address, U256};
//!
//! let recipient: Address = "0x4592d8f8d7b001e72cb26a73e4fa1806a51ac79d".parse().unwrap();
//! let data = erc20::transfer(recipient, U256::from(10).pow(U256::from(21)));
//! assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
//! assert_eq!(data.len(), 4 + 32 * 2);
//! ```
//!
//! Sending through a node is done with
//! [`TransactionBuilder`](transaction_builder::TransactionBuilder) and your own
//! implementation of [`Node`](network::Node).
//!
//! ## License
//!
//! This project is licensed under the Lesser GNU General Public License v3.

pub mod abi;
mod address;
pub use address::{Address, AddressConvertible, AddressValidationError, PrivateKey, PublicKey};
mod error;
pub use error::{Error, Result};
mod keys;
pub use keys::KeyPair;
pub mod network;
pub mod rlp;
pub mod signature;
pub mod transaction_builder;
pub mod transactions;
mod utils;
pub use alloy_primitives::U256;
pub use utils::keccak;
