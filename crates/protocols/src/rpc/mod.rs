//! Read-only access to an Ethereum JSON-RPC endpoint.

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpTransport;

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use std::fmt;

/// Block at which a read executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockTag {
    #[default]
    Latest,
    Number(u64),
}

impl BlockTag {
    /// JSON-RPC block parameter.
    pub fn as_param(&self) -> String {
        match self {
            Self::Latest => "latest".to_string(),
            Self::Number(n) => format!("{n:#x}"),
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Failures of a single JSON-RPC round-trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("execution reverted: {0}")]
    Reverted(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("invalid rpc response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// Classifies a JSON-RPC error object. Nodes report reverts with code 3
    /// (geth) or only in the message text (others).
    pub fn from_rpc(code: i64, message: String) -> Self {
        if code == 3 || message.to_ascii_lowercase().contains("revert") {
            Self::Reverted(message)
        } else {
            Self::Rpc { code, message }
        }
    }

    /// True when a node rejected a pinned read because it has not seen the block yet.
    pub fn is_unknown_block(&self) -> bool {
        match self {
            Self::Rpc { message, .. } => {
                let message = message.to_ascii_lowercase();
                ["header not found", "unknown block", "block not found"]
                    .iter()
                    .any(|needle| message.contains(needle))
            }
            _ => false,
        }
    }
}

/// Minimal transport the validator and aggregator depend on.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Deployed bytecode at `address` (`eth_getCode`).
    async fn get_code(&self, address: Address, block: BlockTag) -> Result<Bytes, TransportError>;

    /// Read-only call (`eth_call`).
    async fn call(&self, to: Address, data: Bytes, block: BlockTag)
    -> Result<Bytes, TransportError>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for std::sync::Arc<T> {
    async fn get_code(&self, address: Address, block: BlockTag) -> Result<Bytes, TransportError> {
        (**self).get_code(address, block).await
    }

    async fn call(
        &self,
        to: Address,
        data: Bytes,
        block: BlockTag,
    ) -> Result<Bytes, TransportError> {
        (**self).call(to, data, block).await
    }
}
