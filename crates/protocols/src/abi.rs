//! Typed call table for the pair, token and multicall contracts.
//!
//! Every read call is declared once as a Solidity signature; `sol!` turns
//! each into a call type with a fixed selector, an encoder and a typed
//! return decoder. Nothing here parses ABI JSON at runtime.

use alloy_primitives::{Address, Bytes, Uint};
use alloy_sol_types::{SolCall, sol};
use primitive_types::U256;

sol! {
    /// Multicall (v1) aggregator. Reverts the whole batch if any call fails.
    interface IMulticall {
        struct Call {
            address target;
            bytes callData;
        }

        function aggregate(Call[] calls) external returns (uint256 blockNumber, bytes[] returnData);
    }

    interface IUniswapV2Pair {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
        function totalSupply() external view returns (uint256);
    }

    interface IERC20Metadata {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
    }
}

/// Read calls issued against pair and token contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Token0,
    Token1,
    GetReserves,
    TotalSupply,
    Name,
    Symbol,
    Decimals,
}

/// Static lookup table from selector to call.
const CALL_TABLE: [([u8; 4], CallKind); 7] = [
    (IUniswapV2Pair::token0Call::SELECTOR, CallKind::Token0),
    (IUniswapV2Pair::token1Call::SELECTOR, CallKind::Token1),
    (IUniswapV2Pair::getReservesCall::SELECTOR, CallKind::GetReserves),
    (IUniswapV2Pair::totalSupplyCall::SELECTOR, CallKind::TotalSupply),
    (IERC20Metadata::nameCall::SELECTOR, CallKind::Name),
    (IERC20Metadata::symbolCall::SELECTOR, CallKind::Symbol),
    (IERC20Metadata::decimalsCall::SELECTOR, CallKind::Decimals),
];

impl CallKind {
    pub fn selector(self) -> [u8; 4] {
        match self {
            Self::Token0 => IUniswapV2Pair::token0Call::SELECTOR,
            Self::Token1 => IUniswapV2Pair::token1Call::SELECTOR,
            Self::GetReserves => IUniswapV2Pair::getReservesCall::SELECTOR,
            Self::TotalSupply => IUniswapV2Pair::totalSupplyCall::SELECTOR,
            Self::Name => IERC20Metadata::nameCall::SELECTOR,
            Self::Symbol => IERC20Metadata::symbolCall::SELECTOR,
            Self::Decimals => IERC20Metadata::decimalsCall::SELECTOR,
        }
    }

    pub fn signature(self) -> &'static str {
        match self {
            Self::Token0 => IUniswapV2Pair::token0Call::SIGNATURE,
            Self::Token1 => IUniswapV2Pair::token1Call::SIGNATURE,
            Self::GetReserves => IUniswapV2Pair::getReservesCall::SIGNATURE,
            Self::TotalSupply => IUniswapV2Pair::totalSupplyCall::SIGNATURE,
            Self::Name => IERC20Metadata::nameCall::SIGNATURE,
            Self::Symbol => IERC20Metadata::symbolCall::SIGNATURE,
            Self::Decimals => IERC20Metadata::decimalsCall::SIGNATURE,
        }
    }

    pub fn from_selector(selector: [u8; 4]) -> Option<Self> {
        CALL_TABLE
            .iter()
            .find(|(s, _)| *s == selector)
            .map(|(_, kind)| *kind)
    }

    /// Calldata for this call. None of the table's calls take arguments.
    pub fn encode(self) -> Bytes {
        let data = match self {
            Self::Token0 => IUniswapV2Pair::token0Call {}.abi_encode(),
            Self::Token1 => IUniswapV2Pair::token1Call {}.abi_encode(),
            Self::GetReserves => IUniswapV2Pair::getReservesCall {}.abi_encode(),
            Self::TotalSupply => IUniswapV2Pair::totalSupplyCall {}.abi_encode(),
            Self::Name => IERC20Metadata::nameCall {}.abi_encode(),
            Self::Symbol => IERC20Metadata::symbolCall {}.abi_encode(),
            Self::Decimals => IERC20Metadata::decimalsCall {}.abi_encode(),
        };
        data.into()
    }
}

/// Decoded `getReserves()` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reserves {
    pub reserve0: U256,
    pub reserve1: U256,
    pub block_timestamp_last: u32,
}

// Decoding is lenient like ethers: dirty padding and trailing words are
// ignored, short data and out-of-range offsets are still rejected.

pub fn decode_token0(data: &[u8]) -> alloy_sol_types::Result<Address> {
    IUniswapV2Pair::token0Call::abi_decode_returns(data, false).map(|r| r._0)
}

pub fn decode_token1(data: &[u8]) -> alloy_sol_types::Result<Address> {
    IUniswapV2Pair::token1Call::abi_decode_returns(data, false).map(|r| r._0)
}

pub fn decode_reserves(data: &[u8]) -> alloy_sol_types::Result<Reserves> {
    IUniswapV2Pair::getReservesCall::abi_decode_returns(data, false).map(|r| Reserves {
        reserve0: to_u256(r.reserve0),
        reserve1: to_u256(r.reserve1),
        block_timestamp_last: r.blockTimestampLast,
    })
}

pub fn decode_total_supply(data: &[u8]) -> alloy_sol_types::Result<U256> {
    IUniswapV2Pair::totalSupplyCall::abi_decode_returns(data, false).map(|r| to_u256(r._0))
}

pub fn decode_name(data: &[u8]) -> alloy_sol_types::Result<String> {
    IERC20Metadata::nameCall::abi_decode_returns(data, false).map(|r| r._0)
}

pub fn decode_symbol(data: &[u8]) -> alloy_sol_types::Result<String> {
    IERC20Metadata::symbolCall::abi_decode_returns(data, false).map(|r| r._0)
}

pub fn decode_decimals(data: &[u8]) -> alloy_sol_types::Result<u8> {
    IERC20Metadata::decimalsCall::abi_decode_returns(data, false).map(|r| r._0)
}

/// Moves an ABI integer of any width into the domain's `U256`.
pub fn to_u256<const BITS: usize, const LIMBS: usize>(value: Uint<BITS, LIMBS>) -> U256 {
    U256::from_big_endian(&value.to_be_bytes_vec())
}
