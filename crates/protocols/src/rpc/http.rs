//! JSON-RPC 2.0 over HTTP.

use super::{BlockTag, RpcTransport, TransportError};
use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Serialize, Debug)]
struct RpcRequest<'a> {
    jsonrpc: &'a str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize, Debug)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize, Debug)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// HTTP transport backed by a shared `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Creates a transport for `url`. `timeout` bounds each HTTP request.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Endpoint this transport posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<R, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        trace!(id, method, "Sending rpc request");

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(classify_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Network(format!("http status {status}")));
        }

        let text = response.text().await.map_err(classify_reqwest)?;
        let envelope: RpcResponse = serde_json::from_str(&text)
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        if let Some(err) = envelope.error {
            debug!(id, method, code = err.code, message = %err.message, "Rpc returned error");
            return Err(TransportError::from_rpc(err.code, err.message));
        }

        let result = envelope
            .result
            .ok_or_else(|| TransportError::InvalidResponse("missing result".to_string()))?;
        serde_json::from_value(result).map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}

fn classify_reqwest(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn get_code(&self, address: Address, block: BlockTag) -> Result<Bytes, TransportError> {
        self.request("eth_getCode", json!([address, block.as_param()]))
            .await
    }

    async fn call(
        &self,
        to: Address,
        data: Bytes,
        block: BlockTag,
    ) -> Result<Bytes, TransportError> {
        self.request(
            "eth_call",
            json!([{ "to": to, "data": data }, block.as_param()]),
        )
        .await
    }
}
