//! Scripted transport for tests.
//!
//! Decodes multicall calldata the same way the on-chain aggregator would and
//! answers each call from a `(target, selector)` table.

use super::{BlockTag, RpcTransport, TransportError};
use crate::abi::{CallKind, IERC20Metadata, IMulticall, IUniswapV2Pair};
use alloy_primitives::aliases::U112;
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Return(Bytes),
    Revert,
}

/// What the mock observed for one `eth_call`.
#[derive(Debug, Clone)]
pub(crate) struct RecordedBatch {
    pub block: BlockTag,
    pub targets: Vec<Address>,
    pub kinds: Vec<Option<CallKind>>,
}

pub(crate) struct MockTransport {
    pub multicall: Address,
    pub block_number: u64,
    code: HashMap<Address, Bytes>,
    replies: HashMap<(Address, [u8; 4]), Reply>,
    network_failure: Option<TransportError>,
    delay: Option<Duration>,
    /// Answers every read pinned to a block number with "header not found".
    lagging: bool,
    /// Targets that may only be queried after a batch including `gate` returned.
    gated: Option<(Address, Vec<Address>)>,
    gate_open: Mutex<bool>,
    pub batches: Mutex<Vec<RecordedBatch>>,
    pub code_requests: AtomicUsize,
}

impl MockTransport {
    pub fn new(multicall: Address) -> Self {
        Self {
            multicall,
            block_number: 19_000_000,
            code: HashMap::new(),
            replies: HashMap::new(),
            network_failure: None,
            delay: None,
            lagging: false,
            gated: None,
            gate_open: Mutex::new(false),
            batches: Mutex::new(Vec::new()),
            code_requests: AtomicUsize::new(0),
        }
    }

    pub fn with_code(mut self, address: Address, code: &'static [u8]) -> Self {
        self.code.insert(address, Bytes::from_static(code));
        self
    }

    pub fn with_reply(mut self, target: Address, kind: CallKind, reply: Reply) -> Self {
        self.replies.insert((target, kind.selector()), reply);
        self
    }

    pub fn with_network_failure(mut self, err: TransportError) -> Self {
        self.network_failure = Some(err);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Behaves like a load-balanced node that is behind the chain head.
    pub fn with_lagging_node(mut self) -> Self {
        self.lagging = true;
        self
    }

    /// Rejects any batch touching `dependents` until a batch touching `gate` completed.
    pub fn with_gate(mut self, gate: Address, dependents: Vec<Address>) -> Self {
        self.gated = Some((gate, dependents));
        self
    }

    /// Scripts a healthy pair and both of its tokens.
    pub fn with_pair(self, pair: &PairFixture) -> Self {
        self.with_reply(pair.pair, CallKind::Token0, ret_address(pair.token0))
            .with_reply(pair.pair, CallKind::Token1, ret_address(pair.token1))
            .with_reply(
                pair.pair,
                CallKind::GetReserves,
                ret_reserves(pair.reserve0, pair.reserve1, pair.timestamp),
            )
            .with_reply(pair.pair, CallKind::TotalSupply, ret_u256(pair.total_supply))
            .with_token(pair.token0, pair.meta0)
            .with_token(pair.token1, pair.meta1)
    }

    pub fn with_token(self, token: Address, meta: (&str, &str, u8)) -> Self {
        let (name, symbol, decimals) = meta;
        self.with_reply(token, CallKind::Name, ret_string(name))
            .with_reply(token, CallKind::Symbol, ret_string(symbol))
            .with_reply(token, CallKind::Decimals, ret_u8(decimals))
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    pub fn recorded(&self) -> Vec<RecordedBatch> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn get_code(&self, address: Address, _block: BlockTag) -> Result<Bytes, TransportError> {
        self.code_requests.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = &self.network_failure {
            return Err(err.clone());
        }
        Ok(self.code.get(&address).cloned().unwrap_or_default())
    }

    async fn call(
        &self,
        to: Address,
        data: Bytes,
        block: BlockTag,
    ) -> Result<Bytes, TransportError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = &self.network_failure {
            return Err(err.clone());
        }
        if to != self.multicall {
            return Err(TransportError::Reverted(format!("no multicall at {to}")));
        }

        let calls = IMulticall::aggregateCall::abi_decode(&data, true)
            .map_err(|e| TransportError::Reverted(e.to_string()))?
            .calls;

        let targets: Vec<Address> = calls.iter().map(|c| c.target).collect();
        let kinds = calls
            .iter()
            .map(|c| {
                let selector: [u8; 4] = c.callData.get(..4)?.try_into().ok()?;
                CallKind::from_selector(selector)
            })
            .collect();
        self.batches.lock().unwrap().push(RecordedBatch {
            block,
            targets: targets.clone(),
            kinds,
        });

        if self.lagging && matches!(block, BlockTag::Number(_)) {
            return Err(TransportError::Rpc {
                code: -32000,
                message: "header not found".to_string(),
            });
        }

        if let Some((_, dependents)) = &self.gated {
            let open = *self.gate_open.lock().unwrap();
            if !open && targets.iter().any(|t| dependents.contains(t)) {
                panic!("dependent batch issued before the gating batch returned");
            }
        }

        let mut return_data = Vec::with_capacity(calls.len());
        for call in &calls {
            let selector: [u8; 4] = call
                .callData
                .get(..4)
                .and_then(|s| s.try_into().ok())
                .unwrap_or_default();
            match self.replies.get(&(call.target, selector)) {
                Some(Reply::Return(bytes)) => return_data.push(bytes.clone()),
                Some(Reply::Revert) | None => {
                    return Err(TransportError::Reverted(
                        "Multicall aggregate: call failed".to_string(),
                    ));
                }
            }
        }

        if let Some((gate, _)) = &self.gated {
            if targets.contains(gate) {
                *self.gate_open.lock().unwrap() = true;
            }
        }

        let number = match block {
            BlockTag::Number(n) => n,
            BlockTag::Latest => self.block_number,
        };
        Ok(
            IMulticall::aggregateCall::abi_encode_returns(&(U256::from(number), return_data))
                .into(),
        )
    }
}

/// Canonical pair used across tests.
pub(crate) struct PairFixture {
    pub pair: Address,
    pub token0: Address,
    pub token1: Address,
    pub reserve0: u128,
    pub reserve1: u128,
    pub timestamp: u32,
    pub total_supply: u128,
    pub meta0: (&'static str, &'static str, u8),
    pub meta1: (&'static str, &'static str, u8),
}

impl Default for PairFixture {
    fn default() -> Self {
        let mut token0 = [0xaa; 20];
        token0[19] = 0x01;
        let mut token1 = [0xaa; 20];
        token1[19] = 0x02;
        Self {
            pair: Address::repeat_byte(0x77),
            token0: Address::from(token0),
            token1: Address::from(token1),
            reserve0: 1_000_000_000_000_000_000,
            reserve1: 2_000_000_000_000_000_000,
            timestamp: 1_690_000_000,
            total_supply: 3_000_000_000_000_000_000,
            meta0: ("Token A", "TKA", 18),
            meta1: ("Token B", "TKB", 18),
        }
    }
}

pub(crate) fn ret_address(address: Address) -> Reply {
    Reply::Return(IUniswapV2Pair::token0Call::abi_encode_returns(&(address,)).into())
}

pub(crate) fn ret_reserves(reserve0: u128, reserve1: u128, timestamp: u32) -> Reply {
    Reply::Return(
        IUniswapV2Pair::getReservesCall::abi_encode_returns(&(
            U112::from(reserve0),
            U112::from(reserve1),
            timestamp,
        ))
        .into(),
    )
}

pub(crate) fn ret_u256(value: u128) -> Reply {
    Reply::Return(
        IUniswapV2Pair::totalSupplyCall::abi_encode_returns(&(U256::from(value),)).into(),
    )
}

pub(crate) fn ret_string(value: &str) -> Reply {
    Reply::Return(IERC20Metadata::nameCall::abi_encode_returns(&(value.to_string(),)).into())
}

pub(crate) fn ret_u8(value: u8) -> Reply {
    Reply::Return(IERC20Metadata::decimalsCall::abi_encode_returns(&(value,)).into())
}
