//! Two-round multicall aggregation of a Uniswap V2 pair.
//!
//! Round one reads `token0`, `token1`, `getReserves` and `totalSupply` from
//! the pair. Round two reads `name`, `symbol` and `decimals` from the two
//! token addresses that round one revealed, so the rounds cannot be merged.

use crate::abi::{self, CallKind, Reserves};
use crate::config::RpcConfig;
use crate::error::{AggregationError, ErrorKind, Round};
use crate::multicall::{self, BatchResult, Call};
use crate::rpc::{BlockTag, RpcTransport, TransportError};
use alloy_primitives::{Address, Bytes, hex};
use pairscope_domain::{PairSnapshot, ReservesSnapshot, TokenInfo};
use primitive_types::U256;
use tracing::{debug, error, info, warn};

const PAIR_CALLS: [CallKind; 4] = [
    CallKind::Token0,
    CallKind::Token1,
    CallKind::GetReserves,
    CallKind::TotalSupply,
];

const TOKEN_CALLS: [CallKind; 3] = [CallKind::Name, CallKind::Symbol, CallKind::Decimals];

/// Output of the pair round.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PairState {
    token0: Address,
    token1: Address,
    reserves: Reserves,
    total_supply: U256,
    block_number: u64,
}

/// ERC-20 metadata from the token round.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TokenMeta {
    name: String,
    symbol: String,
    decimals: u8,
}

/// Resolves pair contracts into [`PairSnapshot`]s.
///
/// Holds no per-query state: every call builds its own batches, so
/// concurrent or abandoned queries cannot affect one another.
pub struct PairAggregator<T> {
    transport: T,
    config: RpcConfig,
}

impl<T: RpcTransport> PairAggregator<T> {
    pub fn new(transport: T, config: RpcConfig) -> Self {
        Self { transport, config }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Aggregates `pair` at the latest block.
    ///
    /// The token round is pinned to the block the pair round executed at,
    /// so reserves and decimals come from the same chain state. Behind a
    /// load balancer the second request may reach a node that has not
    /// imported that block yet; when the node answers "header not found"
    /// the token round is retried at `latest` instead of failing. Reserves
    /// always come from the pair round's block.
    ///
    /// # Errors
    /// `ContractCallFailed` if either batch reverts or the pair reports the
    /// same token twice, `NetworkError` on
    /// transport failure or timeout, `DecodingError` on malformed output.
    pub async fn aggregate(&self, pair: Address) -> Result<PairSnapshot, AggregationError> {
        self.aggregate_at(pair, BlockTag::Latest).await
    }

    /// Aggregates `pair` with both rounds pinned to `block`
    /// (or round two pinned to round one's block when `block` is `Latest`).
    pub async fn aggregate_at(
        &self,
        pair: Address,
        block: BlockTag,
    ) -> Result<PairSnapshot, AggregationError> {
        info!(pair = %pair, block = %block, "Aggregating pair");

        let state = self.fetch_pair_state(pair, block).await?;
        debug!(
            pair = %pair,
            token0 = %state.token0,
            token1 = %state.token1,
            block_number = state.block_number,
            "Pair round decoded"
        );

        if state.token0 == state.token1 {
            warn!(pair = %pair, token = %state.token0, "Pair reports the same token twice");
            return Err(AggregationError::ContractCallFailed {
                round: Round::Pair,
                reason: format!("token0 and token1 are both {}", state.token0),
            });
        }

        let (meta0, meta1) = match block {
            BlockTag::Latest => {
                let pinned = BlockTag::Number(state.block_number);
                match self.fetch_token_meta(state.token0, state.token1, pinned).await {
                    Err(AggregationError::NetworkError { source, .. })
                        if source.is_unknown_block() =>
                    {
                        warn!(
                            pair = %pair,
                            block_number = state.block_number,
                            error = %source,
                            "Node has not seen the pair block, reading tokens at latest"
                        );
                        self.fetch_token_meta(state.token0, state.token1, BlockTag::Latest).await?
                    }
                    other => other?,
                }
            }
            pinned => self.fetch_token_meta(state.token0, state.token1, pinned).await?,
        };

        let token0 = TokenInfo::new(
            state.token0,
            meta0.name,
            meta0.symbol,
            meta0.decimals,
            state.reserves.reserve0,
        );
        let token1 = TokenInfo::new(
            state.token1,
            meta1.name,
            meta1.symbol,
            meta1.decimals,
            state.reserves.reserve1,
        );
        let reserves = ReservesSnapshot {
            reserve0: state.reserves.reserve0,
            reserve1: state.reserves.reserve1,
            block_timestamp_last: state.reserves.block_timestamp_last,
        };

        let snapshot = PairSnapshot::new(
            pair,
            token0,
            token1,
            reserves,
            state.total_supply,
            state.block_number,
        );
        info!(
            pair = %pair,
            symbol0 = %snapshot.token0.symbol,
            symbol1 = %snapshot.token1.symbol,
            block_number = snapshot.block_number,
            "Pair aggregated"
        );
        Ok(snapshot)
    }

    async fn fetch_pair_state(
        &self,
        pair: Address,
        block: BlockTag,
    ) -> Result<PairState, AggregationError> {
        let calls = PAIR_CALLS.map(|kind| Call::new(pair, kind));
        let batch = self.run_batch(Round::Pair, &calls, block).await?;
        let data = &batch.return_data;
        let round = Round::Pair;

        let token0 = decode_at(round, &calls, data, 0, abi::decode_token0)?;
        let token1 = decode_at(round, &calls, data, 1, abi::decode_token1)?;
        let reserves = decode_at(round, &calls, data, 2, abi::decode_reserves)?;
        let total_supply = decode_at(round, &calls, data, 3, abi::decode_total_supply)?;

        Ok(PairState {
            token0,
            token1,
            reserves,
            total_supply,
            block_number: batch.block_number,
        })
    }

    async fn fetch_token_meta(
        &self,
        token0: Address,
        token1: Address,
        block: BlockTag,
    ) -> Result<(TokenMeta, TokenMeta), AggregationError> {
        let calls: Vec<Call> = [token0, token1]
            .into_iter()
            .flat_map(|token| TOKEN_CALLS.map(|kind| Call::new(token, kind)))
            .collect();
        let batch = self.run_batch(Round::Tokens, &calls, block).await?;
        let data = &batch.return_data;

        let meta = |offset: usize| -> Result<TokenMeta, AggregationError> {
            let round = Round::Tokens;
            Ok(TokenMeta {
                name: decode_at(round, &calls, data, offset, abi::decode_name)?,
                symbol: decode_at(round, &calls, data, offset + 1, abi::decode_symbol)?,
                decimals: decode_at(round, &calls, data, offset + 2, abi::decode_decimals)?,
            })
        };

        Ok((meta(0)?, meta(TOKEN_CALLS.len())?))
    }

    /// Submits one atomic batch, bounded by the configured timeout.
    async fn run_batch(
        &self,
        round: Round,
        calls: &[Call],
        block: BlockTag,
    ) -> Result<BatchResult, AggregationError> {
        debug!(round = %round, calls = calls.len(), block = %block, "Submitting batch");
        let data = multicall::encode_batch(calls);

        let raw = tokio::time::timeout(
            self.config.timeout,
            self.transport.call(self.config.multicall_address, data, block),
        )
        .await
        .map_err(|_| TransportError::Timeout)
        .and_then(|r| r)
        .map_err(|e| {
            let err = AggregationError::from_transport(round, e);
            warn!(round = %round, error = %err, "Batch failed");
            err
        })?;

        multicall::decode_batch(&raw, calls.len()).map_err(|e| {
            error!(
                kind = %ErrorKind::DecodingError,
                round = %round,
                call = "aggregate",
                raw = %hex::encode_prefixed(&raw),
                error = %e,
                "Failed to decode batch envelope"
            );
            AggregationError::DecodingError {
                round,
                call: "aggregate((address,bytes)[])",
                index: None,
                raw: raw.clone(),
                reason: e.to_string(),
            }
        })
    }
}

/// Decodes `data[index]` with `decode`, logging full context on failure.
fn decode_at<V, E: std::fmt::Display>(
    round: Round,
    calls: &[Call],
    data: &[Bytes],
    index: usize,
    decode: impl Fn(&[u8]) -> Result<V, E>,
) -> Result<V, AggregationError> {
    let raw = &data[index];
    let call = calls[index];
    decode(raw).map_err(|e| {
        error!(
            kind = %ErrorKind::DecodingError,
            round = %round,
            call = call.kind.signature(),
            target = %call.target,
            index,
            raw = %hex::encode_prefixed(raw),
            error = %e,
            "Failed to decode call result"
        );
        AggregationError::decoding(round, call.kind, index, raw, e)
    })
}
