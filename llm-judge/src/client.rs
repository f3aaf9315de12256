//! Thin HTTP client for the judge endpoint.
//!
//! Two wire formats behind one enum-dispatched client:
//! - Ollama `POST {endpoint}/api/generate` (`stream=false`)
//! - OpenAI-compatible `POST {endpoint}/v1/chat/completions`
//!
//! Transient failures (network errors, timeouts, 429, 5xx) are
//! retried a bounded number of times with doubling backoff; callers
//! above this layer decide what a final failure means (for judging:
//! a safe no-match verdict).

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{JudgeConfig, JudgeProvider};
use crate::errors::{JudgeError, Result};
use crate::parse::truncate;

/// Base backoff between retry attempts; doubles per attempt.
const BACKOFF_BASE: Duration = Duration::from_millis(500);

/// Reusable HTTP client bound to one judge endpoint + model.
#[derive(Debug, Clone)]
pub struct JudgeClient {
    http: reqwest::Client,
    cfg: JudgeConfig,
    url: String,
}

impl JudgeClient {
    pub fn new(cfg: JudgeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        let base = cfg.endpoint.trim_end_matches('/');
        let url = match cfg.provider {
            JudgeProvider::Ollama => format!("{base}/api/generate"),
            JudgeProvider::OpenAi => format!("{base}/v1/chat/completions"),
        };

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs,
            "judge client initialized"
        );

        Ok(Self { http, cfg, url })
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.cfg
    }

    /// One completion with bounded retry on transient failures:
    /// network errors, timeouts, rate limiting (429), and upstream
    /// 5xx. Other statuses and decode failures fail immediately; the
    /// endpoint gave a definitive answer.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let attempts = self.cfg.max_retries.max(1);
        let mut backoff = BACKOFF_BASE;
        let mut last_err: Option<JudgeError> = None;

        for attempt in 1..=attempts {
            match self.generate_once(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() => {
                    warn!(attempt, attempts, error = %e, "transient judge failure");
                    last_err = Some(e);
                    if attempt < attempts {
                        tokio::time::sleep(backoff).await;
                        backoff *= 2;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or(JudgeError::Timeout(Duration::from_secs(
            self.cfg.timeout_secs,
        ))))
    }

    async fn generate_once(&self, prompt: &str) -> Result<String> {
        let started = Instant::now();
        debug!(model = %self.cfg.model, prompt_len = prompt.len(), "POST {}", self.url);

        let mut req = self.http.post(&self.url);
        if let Some(key) = &self.cfg.api_key {
            req = req.bearer_auth(key);
        }
        let resp = match self.cfg.provider {
            JudgeProvider::Ollama => {
                req.json(&OllamaRequest {
                    model: &self.cfg.model,
                    prompt,
                    stream: false,
                })
                .send()
                .await?
            }
            JudgeProvider::OpenAi => {
                req.json(&ChatRequest {
                    model: &self.cfg.model,
                    messages: vec![ChatMessage {
                        role: "user",
                        content: prompt,
                    }],
                    temperature: 0.0,
                })
                .send()
                .await?
            }
        };

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(JudgeError::HttpStatus {
                status,
                url: self.url.clone(),
                snippet: truncate(&body, 200),
            });
        }

        let text = match self.cfg.provider {
            JudgeProvider::Ollama => {
                let out: OllamaResponse = resp
                    .json()
                    .await
                    .map_err(|e| JudgeError::Decode(format!("expected `response`: {e}")))?;
                out.response
            }
            JudgeProvider::OpenAi => {
                let out: ChatResponse = resp.json().await.map_err(|e| {
                    JudgeError::Decode(format!("expected `choices[0].message.content`: {e}"))
                })?;
                out.choices
                    .into_iter()
                    .find_map(|c| c.message.content)
                    .ok_or_else(|| JudgeError::Decode("no choices in response".into()))?
            }
        };

        debug!(
            latency_ms = started.elapsed().as_millis(),
            response_len = text.len(),
            "judge completion ok"
        );
        Ok(text)
    }
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
