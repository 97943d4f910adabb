//! Validate-then-aggregate entry point for front ends.

use crate::aggregator::PairAggregator;
use crate::config::RpcConfig;
use crate::error::InspectError;
use crate::rpc::{BlockTag, HttpTransport, RpcTransport, TransportError};
use crate::validator;
use alloy_primitives::Address;
use pairscope_domain::{PairQuery, PairSnapshot};
use tracing::warn;

/// Runs the full lookup for one user submission.
pub struct PairInspector<T> {
    aggregator: PairAggregator<T>,
}

impl PairInspector<HttpTransport> {
    /// Builds an inspector over HTTP from `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn connect(config: RpcConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config.rpc_url.clone(), config.timeout)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: RpcTransport> PairInspector<T> {
    pub fn new(transport: T, config: RpcConfig) -> Self {
        Self {
            aggregator: PairAggregator::new(transport, config),
        }
    }

    pub fn aggregator(&self) -> &PairAggregator<T> {
        &self.aggregator
    }

    /// Checks that `input` names a deployed contract.
    pub async fn validate(&self, input: &str) -> Result<Address, InspectError> {
        let timeout = self.aggregator.config().timeout;
        Ok(validator::validate(self.aggregator.transport(), input, timeout).await?)
    }

    /// Validates `input` and resolves it at the latest block.
    pub async fn inspect(&self, input: &str) -> Result<PairSnapshot, InspectError> {
        self.inspect_at(input, BlockTag::Latest).await
    }

    /// Validates `input` and resolves it at `block`.
    pub async fn inspect_at(
        &self,
        input: &str,
        block: BlockTag,
    ) -> Result<PairSnapshot, InspectError> {
        let query = PairQuery::new(self.validate(input).await.inspect_err(|e| {
            warn!(input, error = %e, "Rejected pair address");
        })?);
        Ok(self
            .aggregator
            .aggregate_at(query.pair_address, block)
            .await?)
    }
}
