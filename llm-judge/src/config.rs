//! Environment-driven judge configuration.
//!
//! Variables:
//! - `JUDGE_PROVIDER`     — `ollama` (default) or `openai`
//! - `JUDGE_URL`          — endpoint base, default `http://127.0.0.1:11434`
//! - `JUDGE_MODEL`        — model identifier (required for `openai`)
//! - `JUDGE_API_KEY`      — bearer token for OpenAI-compatible endpoints
//! - `JUDGE_TIMEOUT_SECS` — per-request timeout, default 60
//! - `JUDGE_MAX_RETRIES`  — transport retry attempts, default 3

use crate::errors::ConfigError;

/// Which judge backend to talk to. Enum dispatch, no trait objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeProvider {
    /// Local Ollama `/api/generate`.
    Ollama,
    /// OpenAI-compatible `/v1/chat/completions`.
    OpenAi,
}

/// Full configuration for the judge client.
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    pub provider: JudgeProvider,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Bounded retry attempts for transport failures (total tries).
    pub max_retries: u32,
}

impl JudgeConfig {
    /// Read and validate configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match std::env::var("JUDGE_PROVIDER")
            .unwrap_or_else(|_| "ollama".into())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "ollama" => JudgeProvider::Ollama,
            "openai" => JudgeProvider::OpenAi,
            other => return Err(ConfigError::UnsupportedProvider(other.to_string())),
        };

        let endpoint =
            std::env::var("JUDGE_URL").unwrap_or_else(|_| "http://127.0.0.1:11434".into());
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidFormat {
                var: "JUDGE_URL",
                reason: "must start with http:// or https://",
            });
        }

        let model = match std::env::var("JUDGE_MODEL") {
            Ok(m) if !m.trim().is_empty() => m,
            _ if provider == JudgeProvider::OpenAi => {
                return Err(ConfigError::MissingVar("JUDGE_MODEL"));
            }
            _ => "qwen3:14b".into(),
        };

        let api_key = std::env::var("JUDGE_API_KEY").ok().filter(|k| !k.is_empty());

        let timeout_secs = match std::env::var("JUDGE_TIMEOUT_SECS") {
            Ok(v) => v.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                var: "JUDGE_TIMEOUT_SECS",
                reason: "expected u64 seconds",
            })?,
            Err(_) => 60,
        };

        let max_retries = match std::env::var("JUDGE_MAX_RETRIES") {
            Ok(v) => v.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                var: "JUDGE_MAX_RETRIES",
                reason: "expected u32 attempts",
            })?,
            Err(_) => 3,
        };

        Ok(Self {
            provider,
            endpoint,
            model,
            api_key,
            timeout_secs,
            max_retries,
        })
    }
}
