use crate::value_objects::amount::Amount;
use alloy_primitives::Address;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Resolved ERC-20 metadata for one side of a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Pair reserve of this token scaled by `decimals`.
    pub reserve: String,
}

impl TokenInfo {
    /// Builds the token record, normalizing `raw_reserve` by the token's decimals.
    pub fn new(
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        raw_reserve: U256,
    ) -> Self {
        Self {
            address,
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            reserve: Amount::new(raw_reserve, decimals).to_decimal_string(),
        }
    }
}
