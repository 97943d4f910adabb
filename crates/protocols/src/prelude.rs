//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use pairscope_protocols::prelude::*;
//! ```

// Aggregation
pub use crate::aggregator::PairAggregator;
pub use crate::inspector::PairInspector;
pub use crate::validator::{parse_address, validate};

// Configuration
pub use crate::config::{ConfigError, RpcConfig};

// Errors
pub use crate::error::{AggregationError, ErrorKind, InspectError, Round, ValidationError};

// Transport
pub use crate::rpc::{BlockTag, HttpTransport, RpcTransport, TransportError};

// Domain
pub use pairscope_domain::{Amount, PairQuery, PairSnapshot, ReservesSnapshot, TokenInfo};
