//! Recoverable ECDSA signatures in the `(v, r, s)` transaction form.
//!
//! Replay-protected signatures fold the chain id into `v`:
//! `v = recovery_id + chain_id * 2 + 35`. Signatures created before
//! replay protection use `v = recovery_id + 27` and are valid on any chain.

use crate::address::PublicKey;
use crate::error::{Error, Result};
use crate::U256;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, Secp256k1};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest `v` of a pre-replay-protection signature.
pub const LEGACY_V_BASE: u64 = 27;
/// Offset added to `chain_id * 2` in replay-protected `v`.
pub const EIP155_V_OFFSET: u64 = 35;

/// Transaction signature.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signature {
    /// Recovery id, possibly combined with chain id.
    pub v: u64,
    /// `r` component.
    pub r: U256,
    /// `s` component.
    pub s: U256,
}

pub(crate) fn eip155_v(recovery_id: u64, chain_id: u64) -> Result<u64> {
    if chain_id == 0 {
        return Err(Error::InvalidChainId(chain_id));
    }
    chain_id
        .checked_mul(2)
        .and_then(|v| v.checked_add(EIP155_V_OFFSET + recovery_id))
        .ok_or(Error::InvalidChainId(chain_id))
}

pub(crate) fn validate_chain_id(chain_id: u64) -> Result<()> {
    //! Both recovery ids must fit into `v` for this chain.
    eip155_v(1, chain_id).map(|_| ())
}

impl Signature {
    pub(crate) fn from_recoverable(signature: &RecoverableSignature, chain_id: u64) -> Result<Self> {
        let (recovery_id, compact) = signature.serialize_compact();
        // Signing only produces recovery ids 0 and 1.
        let v = eip155_v(recovery_id.to_i32() as u64, chain_id)?;
        Ok(Self {
            v,
            r: U256::from_be_slice(&compact[..32]),
            s: U256::from_be_slice(&compact[32..]),
        })
    }

    pub const fn is_protected(&self) -> bool {
        //! Whether this signature is bound to a chain id.
        self.v >= EIP155_V_OFFSET
    }

    pub const fn chain_id(&self) -> Option<u64> {
        //! Chain id encoded in `v`, if any.
        if self.is_protected() {
            Some((self.v - EIP155_V_OFFSET) / 2)
        } else {
            None
        }
    }

    pub fn recovery_id(&self) -> Result<RecoveryId> {
        //! Extract the recovery id from `v`.
        //!
        //! Fails for `v` values that neither scheme can produce.
        let id = match self.v {
            LEGACY_V_BASE | 28 => self.v - LEGACY_V_BASE,
            v if v >= EIP155_V_OFFSET => (v - EIP155_V_OFFSET) % 2,
            v => {
                return Err(Error::InvalidSignature(format!(
                    "unsupported v value {v}"
                )))
            }
        };
        Ok(RecoveryId::from_i32(id as i32)?)
    }

    pub fn to_compact(&self) -> [u8; 64] {
        //! `r ‖ s`, 32 big-endian bytes each.
        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(&self.r.to_be_bytes::<32>());
        compact[32..].copy_from_slice(&self.s.to_be_bytes::<32>());
        compact
    }

    pub(crate) fn recover(&self, hash: &[u8; 32]) -> Result<PublicKey> {
        let signature = RecoverableSignature::from_compact(&self.to_compact(), self.recovery_id()?)?;
        let message = Message::from_slice(hash)?;
        Ok(Secp256k1::verification_only().recover_ecdsa(&message, &signature)?)
    }
}
