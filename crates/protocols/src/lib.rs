//! On-chain reads for Uniswap V2 pairs.
//!
//! This crate turns a pair address into a [`pairscope_domain::PairSnapshot`]:
//! - Address validation (syntax, then deployed bytecode)
//! - Typed call encoding and decoding for pair and ERC-20 contracts
//! - Two-round batching through the multicall aggregator
//! - JSON-RPC transport over HTTP

/// Prelude module for convenient imports.
pub mod prelude;

/// Typed call table.
pub mod abi;
/// Two-round pair aggregation.
pub mod aggregator;
/// Endpoint configuration.
pub mod config;
/// Error taxonomy.
pub mod error;
/// Validate-then-aggregate facade.
pub mod inspector;
/// Multicall batch encoding.
pub mod multicall;
/// JSON-RPC transport.
pub mod rpc;
/// Address validation.
pub mod validator;

pub use aggregator::PairAggregator;
pub use config::RpcConfig;
pub use error::{AggregationError, ErrorKind, InspectError, ValidationError};
pub use inspector::PairInspector;

