//! Domain types for Uniswap V2 pair inspection.
//!
//! Everything in this crate is a plain value: snapshots are built once per
//! query and never updated in place. No I/O happens here.

/// Pair and token entities.
pub mod entities;
/// Pricing math over normalized reserves.
pub mod math;
/// Serde adapters for on-chain integers.
pub mod serde_u256;
/// Value objects.
pub mod value_objects;

pub use alloy_primitives::Address;
pub use entities::{PairQuery, PairSnapshot, ReservesSnapshot, TokenInfo};
pub use value_objects::amount::Amount;

/// Fixed decimal precision of Uniswap V2 liquidity tokens.
pub const LP_TOKEN_DECIMALS: u8 = 18;
