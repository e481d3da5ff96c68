use crate::types::Network;
use thiserror::Error;

/// Classification of a failed balance attempt.
///
/// Drives endpoint cooldowns in the refresh driver:
/// - Rate limits and connection problems are the endpoint's fault and bench it
/// - Timeouts follow the connection path
/// - Unclassified failures are retried on the same endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The endpoint is throttling us (HTTP 429, JSON-RPC -32005).
    RateLimit,
    /// The endpoint is unreachable or erroring at the transport level.
    Connection,
    /// The attempt did not complete within its deadline.
    Timeout,
    /// Anything else, including malformed responses.
    Unclassified,
}

impl FailureKind {
    /// Classifies a free-form error message.
    ///
    /// Fallback for JSON-RPC errors whose code does not identify the failure on its own.
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        let message_lower = message.to_lowercase();
        if message_lower.contains("429") ||
            message_lower.contains("too many requests") ||
            message_lower.contains("rate limit")
        {
            Self::RateLimit
        } else if message_lower.contains("timeout") || message_lower.contains("timed out") {
            Self::Timeout
        } else if message_lower.contains("econnrefused") ||
            message_lower.contains("failed to fetch") ||
            message_lower.contains("networkerror")
        {
            Self::Connection
        } else {
            Self::Unclassified
        }
    }

    /// Returns `true` if the failure is attributed to the endpoint and warrants a cooldown.
    #[must_use]
    pub fn blames_endpoint(&self) -> bool {
        !matches!(self, Self::Unclassified)
    }

    /// Returns a static string representation for log fields.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimit => "rate_limit",
            Self::Connection => "connection",
            Self::Timeout => "timeout",
            Self::Unclassified => "unclassified",
        }
    }
}

/// Errors that can occur when talking to an RPC endpoint.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UpstreamError {
    /// Request exceeded the configured timeout duration.
    #[error("Request timeout")]
    Timeout,

    /// Failed to establish a connection to the endpoint.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP-level error occurred (non-2xx status code).
    ///
    /// First field is the HTTP status code, second is the error message.
    #[error("HTTP error {0}: {1}")]
    HttpError(u16, String),

    /// JSON-RPC error returned by the endpoint.
    ///
    /// First field is the RPC error code, second is the error message.
    #[error("RPC error {0}: {1}")]
    RpcError(i32, String),

    /// Network-level error from the underlying HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response could not be parsed or was missing the expected fields.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No endpoints are configured for the requested network.
    #[error("No RPC endpoints configured for {0}")]
    NoEndpoints(Network),

    /// Maximum concurrent requests limit has been reached.
    #[error("Concurrency limit reached: {0}")]
    ConcurrencyLimit(String),
}

impl UpstreamError {
    /// Maps this error onto the failure taxonomy used for cooldowns.
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Timeout => FailureKind::Timeout,
            Self::ConnectionFailed(_) => FailureKind::Connection,
            Self::Network(e) if e.is_timeout() => FailureKind::Timeout,
            Self::Network(_) => FailureKind::Connection,
            Self::HttpError(429, _) => FailureKind::RateLimit,
            Self::HttpError(status, _) if (500..=599).contains(status) => FailureKind::Connection,
            Self::RpcError(-32005 | 429, _) => FailureKind::RateLimit,
            Self::RpcError(_, message) => FailureKind::from_message(message),
            _ => FailureKind::Unclassified,
        }
    }
}
