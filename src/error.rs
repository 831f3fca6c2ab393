//! Errors returned by key handling, encoding and signing operations.

use crate::rlp::RLPError;
use thiserror::Error;

/// Convenience alias for results of this crate's core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type.
///
/// Every failure is local and synchronous: nothing is retried or recovered
/// internally, and no operation leaves partially written output behind.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Private key text is not 32 bytes of hex, or the scalar is out of range.
    #[error("invalid private key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// Integer does not fit into a 32-byte ABI word.
    #[error("argument of {0} bytes does not fit into a 32-byte word")]
    ArgumentOverflow(usize),

    /// RLP input is truncated, non-canonical or has the wrong shape.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[from] RLPError),

    /// Chain id is zero or too large to be folded into `v`.
    #[error("invalid chain id: {0}")]
    InvalidChainId(u64),

    /// Signature cannot be parsed, does not recover, or is bound to another chain.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// The operating system random source failed.
    #[error("entropy source failure: {0}")]
    EntropyFailure(String),

    /// Gas limit is below the minimum for a plain transfer.
    #[error("gas limit {got} is below the required minimum of {required}")]
    GasLimitTooLow {
        /// Minimal acceptable gas limit
        required: u64,
        /// Provided gas limit
        got: u64,
    },

    /// Function signature text is malformed or does not match the arguments.
    #[error("ABI signature mismatch: {0}")]
    AbiSignature(String),
}

impl From<secp256k1::Error> for Error {
    fn from(err: secp256k1::Error) -> Self {
        Self::InvalidSignature(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::ArgumentOverflow(33).to_string(),
            "argument of 33 bytes does not fit into a 32-byte word"
        );
        assert_eq!(Error::InvalidChainId(0).to_string(), "invalid chain id: 0");
        assert_eq!(
            Error::GasLimitTooLow {
                required: 21_000,
                got: 20_999
            }
            .to_string(),
            "gas limit 20999 is below the required minimum of 21000"
        );
    }

    #[test]
    fn test_rlp_error_converts() {
        let err: Error = RLPError::InputTooShort.into();
        assert_eq!(err, Error::MalformedEncoding(RLPError::InputTooShort));
        assert!(err.to_string().starts_with("malformed encoding: "));
    }

    #[test]
    fn test_secp_error_converts() {
        let err: Error = secp256k1::Error::InvalidRecoveryId.into();
        assert!(matches!(err, Error::InvalidSignature(_)));
    }
}
