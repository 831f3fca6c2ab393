use thiserror::Error;
use tracing::{debug, warn};

use crate::address::{Address, AddressConvertible};
use crate::error::Error;
use crate::keys::KeyPair;
use crate::network::{AResult, CallRequest, Node};
use crate::rlp::Bytes;
use crate::transactions::{SignedTransaction, Transaction, TX_GAS};
use crate::utils::to_prefixed_hex;
use crate::U256;

#[derive(Clone, Debug, Eq, PartialEq, Default)]
struct TransactionTemplate {
    to: Option<Address>,
    create: bool,
    value: Option<U256>,
    data: Option<Bytes>,
    nonce: Option<u64>,
    gas: Option<u64>,
    gas_price: Option<U256>,
}

/// Transaction builder allows to create and prepare transactions
/// with minimal developers efforts.
///
/// Fields left unset are requested from the node: nonce, gas price and,
/// for anything but a plain transfer, gas limit.
#[derive(Clone, Debug)]
pub struct TransactionBuilder<N: Node> {
    node: N,
    template: TransactionTemplate,
}

/// Result of [`TransactionBuilder::send`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SentTransaction {
    /// Locally computed transaction hash.
    pub hash: [u8; 32],
    /// The broadcast transaction.
    pub signed: SignedTransaction,
}

impl SentTransaction {
    pub fn hash_hex(&self) -> String {
        //! Transaction hash as `0x`-prefixed hex.
        to_prefixed_hex(self.hash)
    }
}

impl<N: Node> TransactionBuilder<N> {
    #[must_use]
    pub fn new(node: N) -> Self {
        //! Create a new builder.
        Self {
            node,
            template: TransactionTemplate::default(),
        }
    }
    #[must_use]
    pub const fn to(mut self, recipient: Address) -> Self {
        //! Set a recipient.
        self.template.to = Some(recipient);
        self.template.create = false;
        self
    }
    #[must_use]
    pub const fn value(mut self, value: U256) -> Self {
        //! Set amount to transfer, in wei.
        self.template.value = Some(value);
        self
    }
    #[must_use]
    pub fn data(mut self, data: Bytes) -> Self {
        //! Set call data.
        self.template.data = Some(data);
        self
    }
    #[must_use]
    pub fn call(self, contract_address: Address, call_bytes: Bytes) -> Self {
        //! Call a contract method, see [`crate::abi`] to prepare `call_bytes`.
        self.to(contract_address).data(call_bytes)
    }
    #[must_use]
    pub fn create(mut self, contract_bytes: Bytes) -> Self {
        //! Deploy a contract.
        self.template.to = None;
        self.template.create = true;
        self.data(contract_bytes)
    }
    #[must_use]
    pub const fn nonce(mut self, nonce: u64) -> Self {
        //! Set a nonce for transaction.
        self.template.nonce = Some(nonce);
        self
    }
    #[must_use]
    pub const fn gas(mut self, gas: u64) -> Self {
        //! Set maximal gas amount for transaction.
        self.template.gas = Some(gas);
        self
    }
    #[must_use]
    pub const fn gas_price(mut self, gas_price: U256) -> Self {
        //! Set gas price for transaction, in wei.
        self.template.gas_price = Some(gas_price);
        self
    }

    pub async fn build(&self, from: Address) -> Result<Transaction, TransactionBuilderError> {
        //! Prepare a `Transaction` sent by `from`. This may perform
        //! network requests to identify appropriate parameters.
        if self.template.to.is_none() && !self.template.create {
            return Err(TransactionBuilderError::EmptyTransaction);
        }
        let nonce = match self.template.nonce {
            Some(nonce) => nonce,
            None => fetch(self.node.pending_nonce(from).await)?,
        };
        let gas_price = match self.template.gas_price {
            Some(price) => price,
            None => fetch(self.node.suggest_gas_price().await)?,
        };
        let to = self.template.to;
        let value = self.template.value.unwrap_or_default();
        let data = self.template.data.clone().unwrap_or_default();
        let gas_limit = match self.template.gas {
            Some(gas) => gas,
            None if to.is_some() && data.is_empty() => TX_GAS,
            None => {
                let request = CallRequest {
                    from: Some(from),
                    to,
                    value,
                    data: data.clone(),
                };
                fetch(self.node.estimate_gas(&request).await)?
            }
        };
        let tx = Transaction::new(nonce, to, value, gas_limit, gas_price, data)?;
        debug!(
            nonce,
            gas_limit,
            gas_price = %gas_price,
            create = tx.is_contract_creation(),
            "built transaction"
        );
        Ok(tx)
    }

    pub async fn send(&self, key: &KeyPair) -> Result<SentTransaction, TransactionBuilderError> {
        //! Build, sign for the node's chain and broadcast.
        let tx = self.build(key.address()).await?;
        let chain_id = fetch(self.node.chain_id().await)?;
        let signed = tx.sign(key, chain_id)?;
        let hash = signed.hash();
        let reported = fetch(self.node.broadcast(&signed.to_broadcastable_bytes()).await)?;
        if reported != hash {
            warn!(
                local = %to_prefixed_hex(hash),
                node = %to_prefixed_hex(reported),
                "node reported a different transaction hash"
            );
        }
        debug!(hash = %to_prefixed_hex(hash), chain_id, "broadcast transaction");
        Ok(SentTransaction { hash, signed })
    }
}

fn fetch<T>(response: AResult<T>) -> Result<T, TransactionBuilderError> {
    response.map_err(|e| TransactionBuilderError::Network(e.to_string()))
}

/// Transaction creation errors
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum TransactionBuilderError {
    /// Network error (failed to fetch data from node)
    #[error("Failed to retrieve data from network: {0}")]
    Network(String),
    /// Neither recipient nor contract code provided
    #[error("Cannot build an empty transaction - set a recipient or contract code first.")]
    EmptyTransaction,
    /// Transaction cannot be created or signed
    #[error(transparent)]
    Transaction(#[from] Error),
}
