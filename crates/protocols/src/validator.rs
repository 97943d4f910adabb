//! Address validation ahead of any multicall round-trip.

use crate::error::ValidationError;
use crate::rpc::{BlockTag, RpcTransport, TransportError};
use alloy_primitives::Address;
use std::time::Duration;
use tracing::{debug, warn};

/// Pure syntax check: `0x` followed by 40 hex digits.
///
/// All-lowercase and all-uppercase digits are accepted as-is; mixed case
/// must carry a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address, ValidationError> {
    let trimmed = input.trim();
    let invalid = || ValidationError::InvalidAddressFormat(input.to_string());

    let hex = trimmed.strip_prefix("0x").ok_or_else(invalid)?;
    if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let has_lower = hex.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(trimmed, None).map_err(|_| invalid())
    } else {
        trimmed.parse().map_err(|_| invalid())
    }
}

/// Validates `input` and confirms bytecode is deployed at it.
///
/// The syntax check runs first and never touches the network. The bytecode
/// read is bounded by `timeout`.
///
/// # Errors
/// `InvalidAddressFormat`, `NotAContract`, or `Network` when the bytecode
/// read fails or times out.
pub async fn validate<T>(
    transport: &T,
    input: &str,
    timeout: Duration,
) -> Result<Address, ValidationError>
where
    T: RpcTransport + ?Sized,
{
    let address = parse_address(input)?;

    let code = tokio::time::timeout(timeout, transport.get_code(address, BlockTag::Latest))
        .await
        .map_err(|_| ValidationError::Network(TransportError::Timeout))?
        .map_err(ValidationError::Network)?;

    if code.iter().all(|b| *b == 0) {
        warn!(address = %address, "No bytecode at address");
        return Err(ValidationError::NotAContract(address));
    }

    debug!(address = %address, code_len = code.len(), "Address holds a contract");
    Ok(address)
}
