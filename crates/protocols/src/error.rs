//! Error taxonomy surfaced to the renderer.

use crate::abi::CallKind;
use crate::rpc::TransportError;
use alloy_primitives::{Address, Bytes};
use std::fmt;

/// The five failure classes a lookup can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidAddressFormat,
    NotAContract,
    ContractCallFailed,
    DecodingError,
    NetworkError,
}

impl ErrorKind {
    /// Fixed user-facing text. Never includes internal error details.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::InvalidAddressFormat => "The address provided is not a valid Ethereum address.",
            Self::NotAContract => {
                "The address provided is not a contract. Please enter a valid Uniswap V2 pair address."
            }
            Self::ContractCallFailed => {
                "Contract call failed. This may not be a valid Uniswap V2 pair address."
            }
            Self::DecodingError => "Application error. Please report this bug.",
            Self::NetworkError => {
                "Network connection issue. Please check your internet connection or try a different RPC provider."
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidAddressFormat => "InvalidAddressFormat",
            Self::NotAContract => "NotAContract",
            Self::ContractCallFailed => "ContractCallFailed",
            Self::DecodingError => "DecodingError",
            Self::NetworkError => "NetworkError",
        };
        f.write_str(name)
    }
}

/// Failures of [`crate::validator::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid address format: {0:?}")]
    InvalidAddressFormat(String),
    #[error("no contract deployed at {0}")]
    NotAContract(Address),
    #[error("bytecode lookup failed: {0}")]
    Network(TransportError),
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAddressFormat(_) => ErrorKind::InvalidAddressFormat,
            Self::NotAContract(_) => ErrorKind::NotAContract,
            Self::Network(_) => ErrorKind::NetworkError,
        }
    }
}

/// Which of the two multicall batches an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    Pair,
    Tokens,
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pair => f.write_str("pair"),
            Self::Tokens => f.write_str("tokens"),
        }
    }
}

/// Failures of [`crate::aggregator::PairAggregator::aggregate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    #[error("{round} batch reverted: {reason}")]
    ContractCallFailed { round: Round, reason: String },
    #[error("failed to decode {call} in {round} batch (index {index:?}): {reason}")]
    DecodingError {
        round: Round,
        /// Signature of the call whose output failed, or `aggregate` for the envelope.
        call: &'static str,
        index: Option<usize>,
        raw: Bytes,
        reason: String,
    },
    #[error("{round} batch network failure: {source}")]
    NetworkError { round: Round, source: TransportError },
}

impl AggregationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ContractCallFailed { .. } => ErrorKind::ContractCallFailed,
            Self::DecodingError { .. } => ErrorKind::DecodingError,
            Self::NetworkError { .. } => ErrorKind::NetworkError,
        }
    }

    /// Maps a transport failure of `round` onto the taxonomy.
    pub(crate) fn from_transport(round: Round, err: TransportError) -> Self {
        match err {
            TransportError::Reverted(reason) => Self::ContractCallFailed { round, reason },
            other => Self::NetworkError {
                round,
                source: other,
            },
        }
    }

    pub(crate) fn decoding(
        round: Round,
        kind: CallKind,
        index: usize,
        raw: &Bytes,
        err: impl fmt::Display,
    ) -> Self {
        Self::DecodingError {
            round,
            call: kind.signature(),
            index: Some(index),
            raw: raw.clone(),
            reason: err.to_string(),
        }
    }
}

/// Anything [`crate::inspector::PairInspector::inspect`] can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InspectError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

impl InspectError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(e) => e.kind(),
            Self::Aggregation(e) => e.kind(),
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_mapping() {
        let reverted = AggregationError::from_transport(
            Round::Pair,
            TransportError::Reverted("execution reverted".into()),
        );
        assert_eq!(reverted.kind(), ErrorKind::ContractCallFailed);

        let timeout = AggregationError::from_transport(Round::Tokens, TransportError::Timeout);
        assert_eq!(timeout.kind(), ErrorKind::NetworkError);

        let rpc = AggregationError::from_transport(
            Round::Tokens,
            TransportError::Rpc {
                code: -32603,
                message: "internal".into(),
            },
        );
        assert_eq!(rpc.kind(), ErrorKind::NetworkError);
    }

    #[test]
    fn test_decoding_message_hides_details() {
        let err = InspectError::from(AggregationError::decoding(
            Round::Tokens,
            CallKind::Decimals,
            2,
            &Bytes::from_static(&[0xde, 0xad]),
            "buffer overrun",
        ));
        assert_eq!(err.kind(), ErrorKind::DecodingError);
        assert!(!err.user_message().contains("buffer overrun"));
        assert!(err.to_string().contains("decimals()"));
    }

    #[test]
    fn test_every_kind_has_distinct_message() {
        let kinds = [
            ErrorKind::InvalidAddressFormat,
            ErrorKind::NotAContract,
            ErrorKind::ContractCallFailed,
            ErrorKind::DecodingError,
            ErrorKind::NetworkError,
        ];
        let messages: std::collections::HashSet<_> =
            kinds.iter().map(|k| k.user_message()).collect();
        assert_eq!(messages.len(), kinds.len());
    }
}
