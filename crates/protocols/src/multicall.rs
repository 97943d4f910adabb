//! Batching of read calls through the on-chain multicall aggregator.

use crate::abi::{CallKind, IMulticall};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;

/// One entry of a batch: which contract to call and what to ask it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    pub target: Address,
    pub kind: CallKind,
}

impl Call {
    pub fn new(target: Address, kind: CallKind) -> Self {
        Self { target, kind }
    }
}

/// Decoded `aggregate` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    /// Block the aggregator executed the batch at.
    pub block_number: u64,
    /// Raw return data, index-aligned with the submitted calls.
    pub return_data: Vec<Bytes>,
}

/// Errors produced while unpacking an `aggregate` response.
#[derive(Debug, thiserror::Error)]
pub enum BatchDecodeError {
    #[error("malformed aggregate response: {0}")]
    Abi(#[from] alloy_sol_types::Error),
    #[error("expected {expected} results, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("block number {0} does not fit in u64")]
    BlockNumberOverflow(String),
}

/// Encodes `calls` as `aggregate` calldata.
pub fn encode_batch(calls: &[Call]) -> Bytes {
    let calls = calls
        .iter()
        .map(|call| IMulticall::Call {
            target: call.target,
            callData: call.kind.encode(),
        })
        .collect();
    IMulticall::aggregateCall { calls }.abi_encode().into()
}

/// Decodes an `aggregate` response and checks it answers every call.
pub fn decode_batch(raw: &[u8], expected_len: usize) -> Result<BatchResult, BatchDecodeError> {
    let ret = IMulticall::aggregateCall::abi_decode_returns(raw, true)?;

    if ret.returnData.len() != expected_len {
        return Err(BatchDecodeError::LengthMismatch {
            expected: expected_len,
            actual: ret.returnData.len(),
        });
    }

    let block_number = u64::try_from(ret.blockNumber)
        .map_err(|_| BatchDecodeError::BlockNumberOverflow(ret.blockNumber.to_string()))?;

    Ok(BatchResult {
        block_number,
        return_data: ret.returnData,
    })
}
