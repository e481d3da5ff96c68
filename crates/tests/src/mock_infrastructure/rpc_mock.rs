//! RPC Mock Builder for Solana-style JSON-RPC testing
//!
//! Wraps mockito to provide `getBalance` response builders and the failure shapes the
//! refresh driver classifies.

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

fn get_balance_matcher() -> Matcher {
    Matcher::Regex(r#""method"\s*:\s*"getBalance""#.to_string())
}

/// Builder for creating mock RPC endpoint responses.
pub struct RpcMockBuilder {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl RpcMockBuilder {
    /// Creates a new RPC mock builder with a fresh mockito server.
    pub async fn new() -> Self {
        Self { server: Server::new_async().await, mocks: Vec::new() }
    }

    /// Returns the URL of the mock server.
    #[must_use]
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Mocks a successful `getBalance` returning `lamports`, expected `hits` times.
    pub fn mock_get_balance(&mut self, lamports: u64, hits: usize) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/")
            .match_body(get_balance_matcher())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "result": { "context": { "slot": 1 }, "value": lamports }
                })
                .to_string(),
            )
            .expect(hits)
            .create();

        self.mocks.push(mock);
        self
    }

    /// Mocks an HTTP 429 for any `getBalance`.
    pub fn mock_rate_limited(&mut self) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/")
            .match_body(get_balance_matcher())
            .with_status(429)
            .with_body("Too many requests")
            .expect_at_least(1)
            .create();

        self.mocks.push(mock);
        self
    }

    /// Mocks a JSON-RPC error object for any `getBalance`.
    pub fn mock_rpc_error(&mut self, code: i32, message: &str) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/")
            .match_body(get_balance_matcher())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "error": { "code": code, "message": message }
                })
                .to_string(),
            )
            .expect_at_least(1)
            .create();

        self.mocks.push(mock);
        self
    }

    /// Mocks a bare HTTP error status for any `getBalance`.
    pub fn mock_http_error(&mut self, status: usize) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/")
            .match_body(get_balance_matcher())
            .with_status(status)
            .with_body("upstream unavailable")
            .expect_at_least(1)
            .create();

        self.mocks.push(mock);
        self
    }

    /// Asserts every registered mock saw its expected number of hits.
    pub async fn assert_all(&self) {
        for mock in &self.mocks {
            mock.assert_async().await;
        }
    }
}
