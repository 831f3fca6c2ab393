//! Interface to an Ethereum node.
//!
//! This crate does not ship a transport: callers implement [`Node`] over
//! whatever JSON-RPC client they use (or an in-memory fake in tests) and
//! pass it to [`TransactionBuilder`](crate::transaction_builder::TransactionBuilder).

use crate::address::Address;
use crate::rlp::Bytes;
use crate::U256;
use async_trait::async_trait;
use thiserror::Error;

#[cfg(feature = "serde")]
use crate::utils::unhex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generic result of all asynchronous calls in this module.
pub type AResult<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Ethereum mainnet.
pub const MAINNET_CHAIN_ID: u64 = 1;
/// Sepolia testnet.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;
/// Holesky testnet.
pub const HOLESKY_CHAIN_ID: u64 = 17_000;
/// Local development chains (ganache, hardhat and anvil use it by default).
pub const DEV_CHAIN_ID: u64 = 1337;

/// Errors a [`Node`] implementation may report.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum NodeError {
    /// Transaction broadcast failed
    #[error("Failed to broadcast: {}", .0.trim_end())]
    BroadcastFailed(String),
    /// Node cannot estimate gas for the call
    #[error("Failed to estimate gas: {}", .0.trim_end())]
    EstimationFailed(String),
    /// Unexpected failure
    #[error("Unknown error: {}", .0.trim_end())]
    Unknown(String),
}

/// Parameters of `eth_estimateGas`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CallRequest {
    /// Sender
    pub from: Option<Address>,
    /// Recipient, `None` for contract creation
    pub to: Option<Address>,
    /// Amount to transfer
    pub value: U256,
    /// Call data or contract code
    #[cfg_attr(feature = "serde", serde(with = "serde_with::As::<unhex::Hex>"))]
    pub data: Bytes,
}

/// Operations the transaction workflow needs from a node.
#[async_trait]
pub trait Node: Send + Sync {
    /// Next nonce for `address`, including pending transactions.
    async fn pending_nonce(&self, address: Address) -> AResult<u64>;

    /// Gas price the node suggests for timely inclusion.
    async fn suggest_gas_price(&self) -> AResult<U256>;

    /// Gas the node expects `request` to consume.
    async fn estimate_gas(&self, request: &CallRequest) -> AResult<u64>;

    /// Chain id of the network this node serves.
    async fn chain_id(&self) -> AResult<u64>;

    /// Submit signed transaction bytes, returning the transaction hash.
    async fn broadcast(&self, raw: &[u8]) -> AResult<[u8; 32]>;
}

#[async_trait]
impl<T: Node + ?Sized> Node for &T {
    async fn pending_nonce(&self, address: Address) -> AResult<u64> {
        (**self).pending_nonce(address).await
    }

    async fn suggest_gas_price(&self) -> AResult<U256> {
        (**self).suggest_gas_price().await
    }

    async fn estimate_gas(&self, request: &CallRequest) -> AResult<u64> {
        (**self).estimate_gas(request).await
    }

    async fn chain_id(&self) -> AResult<u64> {
        (**self).chain_id().await
    }

    async fn broadcast(&self, raw: &[u8]) -> AResult<[u8; 32]> {
        (**self).broadcast(raw).await
    }
}
