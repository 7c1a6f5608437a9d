//! 失败分类：把单次请求的失败归入固定的几类，供重试策略与日志使用。
//!
//! Failure classification for a single text-generation attempt.

use std::fmt;
use std::time::Duration;

/// Why one attempt against the text backend did not yield content.
///
/// Every kind is retryable under the shared [`RetryPolicy`](super::RetryPolicy) budget;
/// the distinction exists for logging and for the final `AiUnavailable` error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// HTTP 429 from the backend.
    RateLimited,
    /// Any other non-2xx status. `message` is the provider's error text when it sent one.
    HttpStatus { status: u16, message: String },
    /// Connection refused, reset, TLS failure, body read failure...
    Transport(String),
    /// The attempt did not complete within its deadline.
    Timeout(Duration),
    /// 2xx but neither accepted body shape yielded non-empty content.
    MalformedResponse(String),
}

impl FailureKind {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 429 {
            return FailureKind::RateLimited;
        }
        FailureKind::HttpStatus {
            status,
            message: provider_error_message(body).unwrap_or_else(|| "Unknown error".to_string()),
        }
    }

    /// Short stable label for structured logs.
    pub fn class(&self) -> &'static str {
        match self {
            FailureKind::RateLimited => "rate_limited",
            FailureKind::HttpStatus { status, .. } if *status >= 500 => "server_error",
            FailureKind::HttpStatus { .. } => "http_error",
            FailureKind::Transport(_) => "transport",
            FailureKind::Timeout(_) => "timeout",
            FailureKind::MalformedResponse(_) => "malformed_response",
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FailureKind::RateLimited)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::RateLimited => write!(f, "rate limited (HTTP 429)"),
            FailureKind::HttpStatus { status, message } => {
                write!(f, "HTTP {}: {}", status, message)
            }
            FailureKind::Transport(msg) => write!(f, "transport failure: {}", msg),
            FailureKind::Timeout(d) => write!(f, "attempt timed out after {}ms", d.as_millis()),
            FailureKind::MalformedResponse(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

/// Pull `error.message` out of an OpenAI-style error body.
fn provider_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
