//! Endpoint configuration.

use crate::validator::parse_address;
use alloy_primitives::{Address, address};
use std::env;
use std::time::Duration;

/// Public mainnet endpoint used when nothing else is configured.
pub const DEFAULT_RPC_URL: &str = "https://eth-mainnet.public.blastapi.io";

/// Multicall (v1) deployment on Ethereum mainnet.
pub const DEFAULT_MULTICALL_ADDRESS: Address = address!("5BA1e12693Dc8F9c48aAD8770482f4739bEeD696");

/// Default bound on a single network round.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_RPC_URL: &str = "PAIRSCOPE_RPC_URL";
pub const ENV_MULTICALL_ADDRESS: &str = "PAIRSCOPE_MULTICALL_ADDRESS";
pub const ENV_TIMEOUT_SECS: &str = "PAIRSCOPE_TIMEOUT_SECS";

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid address: {value}")]
    InvalidAddress { var: &'static str, value: String },
    #[error("{var} is not a positive number of seconds: {value}")]
    InvalidTimeout { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Configuration for talking to the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Multicall aggregator contract.
    pub multicall_address: Address,
    /// Bound on each network round (bytecode check, each multicall batch).
    pub timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            multicall_address: DEFAULT_MULTICALL_ADDRESS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RpcConfig {
    /// Reads `PAIRSCOPE_*` variables, falling back to mainnet defaults.
    ///
    /// # Errors
    /// Returns an error if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RpcConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_RPC_URL) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::Empty { var: ENV_RPC_URL });
            }
            config.rpc_url = url.to_string();
        }

        if let Some(value) = lookup(ENV_MULTICALL_ADDRESS) {
            config.multicall_address =
                parse_address(&value).map_err(|_| ConfigError::InvalidAddress {
                    var: ENV_MULTICALL_ADDRESS,
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = value
                .trim()
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    var: ENV_TIMEOUT_SECS,
                    value: value.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    pub fn with_multicall_address(mut self, address: Address) -> Self {
        self.multicall_address = address;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_mainnet() {
        let config = RpcConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RpcConfig::default());
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(
            config.multicall_address.to_checksum(None),
            "0x5BA1e12693Dc8F9c48aAD8770482f4739bEeD696"
        );
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_overrides() {
        let config = RpcConfig::from_lookup(lookup(&[
            (ENV_RPC_URL, "http://localhost:8545"),
            (ENV_MULTICALL_ADDRESS, "0xeefba1e63905ef1d7acba5a8513c70307c1ce441"),
            (ENV_TIMEOUT_SECS, "3"),
        ]))
        .unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(
            config.multicall_address,
            address!("eefba1e63905ef1d7acba5a8513c70307c1ce441")
        );
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_multicall_accepts_checksummed_and_single_case() {
        for value in [
            "0x5BA1e12693Dc8F9c48aAD8770482f4739bEeD696",
            "0x5ba1e12693dc8f9c48aad8770482f4739beed696",
            " 0x5BA1E12693DC8F9C48AAD8770482F4739BEED696 ",
        ] {
            let config = RpcConfig::from_lookup(lookup(&[(ENV_MULTICALL_ADDRESS, value)])).unwrap();
            assert_eq!(config.multicall_address, DEFAULT_MULTICALL_ADDRESS);
        }
    }

    #[test]
    fn test_malformed_values() {
        assert!(matches!(
            RpcConfig::from_lookup(lookup(&[(ENV_MULTICALL_ADDRESS, "0x123")])),
            Err(ConfigError::InvalidAddress { .. })
        ));
        assert!(matches!(
            RpcConfig::from_lookup(lookup(&[(
                ENV_MULTICALL_ADDRESS,
                "0x5bA1e12693Dc8F9c48aAD8770482f4739bEeD696"
            )])),
            Err(ConfigError::InvalidAddress { .. })
        ));
        assert!(matches!(
            RpcConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            RpcConfig::from_lookup(lookup(&[(ENV_RPC_URL, "  ")])),
            Err(ConfigError::Empty { .. })
        ));
    }
}
