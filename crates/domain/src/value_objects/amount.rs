use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A raw on-chain integer paired with the power-of-ten scale of its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    #[serde(with = "crate::serde_u256")]
    pub raw: U256,
    pub decimals: u8,
}

impl Amount {
    pub fn new(raw: impl Into<U256>, decimals: u8) -> Self {
        Self {
            raw: raw.into(),
            decimals,
        }
    }

    /// Exact base-10 rendering of `raw / 10^decimals`.
    ///
    /// Trailing fractional zeros are dropped, and so is the point when
    /// nothing remains after it: `5 * 10^18` at 18 decimals is `"5"`.
    pub fn to_decimal_string(&self) -> String {
        let digits = self.raw.to_string();
        let scale = usize::from(self.decimals);
        if scale == 0 {
            return digits;
        }

        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };

        let (whole, fraction) = padded.split_at(padded.len() - scale);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{fraction}")
        }
    }

    /// Converts to a `Decimal`, or `None` when the integer part does not fit.
    pub fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from_str(&self.to_decimal_string()).ok()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}
