//! Balance transport: the seam between the refresh driver and the raw network client.

use async_trait::async_trait;
use serde::Deserialize;
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use crate::{
    types::{JsonRpcRequest, JsonRpcResponse},
    upstream::{http_client::HttpClient, UpstreamError},
};

/// Fetches the native balance of an account from a specific endpoint.
///
/// Implementations return typed [`UpstreamError`]s so the driver can classify
/// failures without inspecting messages.
#[async_trait]
pub trait BalanceTransport: Send + Sync {
    /// Returns the balance of `account` in lamports as reported by `endpoint`.
    async fn get_balance(&self, endpoint: &str, account: &str) -> Result<u64, UpstreamError>;
}

#[derive(Debug, Deserialize)]
struct BalanceValue {
    value: u64,
}

/// JSON-RPC `getBalance` over HTTP.
pub struct HttpBalanceTransport {
    http_client: Arc<HttpClient>,
    request_timeout: Duration,
    next_id: AtomicU64,
}

impl HttpBalanceTransport {
    #[must_use]
    pub fn new(http_client: Arc<HttpClient>, request_timeout: Duration) -> Self {
        Self { http_client, request_timeout, next_id: AtomicU64::new(1) }
    }

    fn build_request(&self, account: &str) -> JsonRpcRequest {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        JsonRpcRequest::new(
            "getBalance",
            Some(serde_json::json!([account, { "commitment": "confirmed" }])),
            serde_json::json!(id),
        )
    }

    /// Extracts the lamport value from a `getBalance` response body.
    fn parse_response(body: &[u8]) -> Result<u64, UpstreamError> {
        let response: JsonRpcResponse = serde_json::from_slice(body)
            .map_err(|e| UpstreamError::InvalidResponse(format!("Invalid JSON: {e}")))?;

        if let Some(error) = response.error {
            return Err(UpstreamError::RpcError(error.code, error.message));
        }

        let result = response
            .result
            .ok_or_else(|| UpstreamError::InvalidResponse("missing result".to_string()))?;

        // Some nodes answer with a bare number instead of the context wrapper.
        if let Some(lamports) = result.as_u64() {
            return Ok(lamports);
        }

        serde_json::from_value::<BalanceValue>(result)
            .map(|balance| balance.value)
            .map_err(|e| UpstreamError::InvalidResponse(format!("unexpected balance shape: {e}")))
    }
}

#[async_trait]
impl BalanceTransport for HttpBalanceTransport {
    async fn get_balance(&self, endpoint: &str, account: &str) -> Result<u64, UpstreamError> {
        let request = self.build_request(account);
        let body = serde_json::to_vec(&request).map_err(|e| {
            UpstreamError::InvalidRequest(format!("Failed to serialize request: {e}"))
        })?;

        tracing::trace!(endpoint = endpoint, account = account, "sending getBalance");

        let response_bytes = self
            .http_client
            .send_request(endpoint, bytes::Bytes::from(body), self.request_timeout)
            .await?;

        Self::parse_response(&response_bytes)
    }
}
