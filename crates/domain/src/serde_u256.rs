//! Serializes `U256` as a base-10 integer string.
//!
//! `primitive-types` emits hex quantities by default, which is the wire
//! format of JSON-RPC but not what a reader of a snapshot expects.

use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serializer, de::Error};

pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    U256::from_dec_str(&s).map_err(|e| D::Error::custom(format!("invalid integer {s:?}: {e:?}")))
}
