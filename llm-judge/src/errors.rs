//! Unified error handling for `llm-judge`.
//!
//! One top-level [`JudgeError`] for the crate, with configuration
//! problems grouped in [`ConfigError`]. These errors stay internal to
//! the adapter: the judging surface itself degrades to safe no-match
//! verdicts instead of surfacing them to the matcher.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Unified result alias for the crate.
pub type Result<T> = std::result::Result<T, JudgeError>;

/// Top-level error for the `llm-judge` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum JudgeError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying HTTP transport error.
    #[error("[LLM Judge] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from the judge endpoint.
    #[error("[LLM Judge] unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        status: StatusCode,
        url: String,
        /// Short snippet of the response body for diagnosis.
        snippet: String,
    },

    /// Unexpected/invalid JSON shape from the judge endpoint.
    #[error("[LLM Judge] failed to decode response: {0}")]
    Decode(String),

    /// Request exceeded the configured timeout.
    #[error("[LLM Judge] operation timed out after {0:?}")]
    Timeout(Duration),
}

impl JudgeError {
    /// Whether a failure is transport-level and worth retrying:
    /// network errors, timeouts, rate limiting (429), and upstream
    /// 5xx. Other statuses and decode failures mean the endpoint
    /// answered; asking again with the same prompt mostly burns the
    /// retry budget.
    pub fn is_transient(&self) -> bool {
        match self {
            JudgeError::Transport(_) | JudgeError::Timeout(_) => true,
            JudgeError::HttpStatus { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }
}

/// Errors for environment-driven judge configuration.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[LLM Judge] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (timeouts, retry counts).
    #[error("[LLM Judge] invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// Unsupported provider in `JUDGE_PROVIDER`.
    #[error("[LLM Judge] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Value had the wrong format (e.g. endpoint URL).
    #[error("[LLM Judge] invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_status(code: u16) -> JudgeError {
        JudgeError::HttpStatus {
            status: StatusCode::from_u16(code).unwrap(),
            url: "http://judge.local".into(),
            snippet: String::new(),
        }
    }

    #[test]
    fn rate_limits_and_server_errors_are_transient() {
        assert!(http_status(429).is_transient());
        assert!(http_status(500).is_transient());
        assert!(http_status(503).is_transient());
        assert!(JudgeError::Timeout(Duration::from_secs(1)).is_transient());
    }

    #[test]
    fn client_errors_and_decode_failures_are_not() {
        assert!(!http_status(400).is_transient());
        assert!(!http_status(404).is_transient());
        assert!(!JudgeError::Decode("not json".into()).is_transient());
    }
}
