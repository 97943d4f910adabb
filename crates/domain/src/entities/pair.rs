use crate::LP_TOKEN_DECIMALS;
use crate::entities::token::TokenInfo;
use crate::math::constant_product::spot_price;
use crate::value_objects::amount::Amount;
use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single user request to inspect a pair contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairQuery {
    pub pair_address: Address,
}

impl PairQuery {
    pub fn new(pair_address: Address) -> Self {
        Self { pair_address }
    }
}

/// Raw `getReserves()` output, kept un-normalized for traceability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservesSnapshot {
    #[serde(with = "crate::serde_u256")]
    pub reserve0: U256,
    #[serde(with = "crate::serde_u256")]
    pub reserve1: U256,
    /// Unix timestamp of the block that last touched the reserves.
    pub block_timestamp_last: u32,
}

/// Fully resolved view of a Uniswap V2 pair at one point in time.
///
/// `token0` and `token1` keep the order reported by the pair contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairSnapshot {
    pub pair: Address,
    pub token0: TokenInfo,
    pub token1: TokenInfo,
    pub reserves: ReservesSnapshot,
    /// LP token supply, always scaled by 18 decimals.
    pub total_supply: String,
    /// Block height the pair batch executed at.
    pub block_number: u64,
    /// Wall-clock time the snapshot was assembled.
    pub last_updated: DateTime<Utc>,
}

impl PairSnapshot {
    pub fn new(
        pair: Address,
        token0: TokenInfo,
        token1: TokenInfo,
        reserves: ReservesSnapshot,
        total_supply_raw: U256,
        block_number: u64,
    ) -> Self {
        Self {
            pair,
            token0,
            token1,
            reserves,
            total_supply: Amount::new(total_supply_raw, LP_TOKEN_DECIMALS).to_decimal_string(),
            block_number,
            last_updated: Utc::now(),
        }
    }

    /// Normalized reserve of token0.
    pub fn reserve0(&self) -> Amount {
        Amount::new(self.reserves.reserve0, self.token0.decimals)
    }

    /// Normalized reserve of token1.
    pub fn reserve1(&self) -> Amount {
        Amount::new(self.reserves.reserve1, self.token1.decimals)
    }

    /// Price of one token0 in units of token1.
    pub fn price_of_token0(&self) -> Option<Decimal> {
        spot_price(&self.reserve0(), &self.reserve1())
    }

    /// Price of one token1 in units of token0.
    pub fn price_of_token1(&self) -> Option<Decimal> {
        spot_price(&self.reserve1(), &self.reserve0())
    }
}
