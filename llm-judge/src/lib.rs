//! LLM-backed implementation of the [`MatchJudge`] adapter contract.
//!
//! Wraps a thin HTTP client (Ollama or OpenAI-compatible, enum
//! dispatch), the matching prompt, and tolerant verdict parsing into
//! the single seam the matcher consumes. The adapter is fail-soft end
//! to end: transport failures exhaust a bounded retry budget and then
//! degrade to a low-confidence no-match verdict; unparsable replies do
//! the same. The matching engine itself never sees an error from here.

pub mod client;
pub mod config;
pub mod errors;
pub mod parse;
pub mod prompt;

use tracing::warn;

use eval_engine::{Finding, MatchJudge, MatchVerdict};

use client::JudgeClient;
use config::JudgeConfig;
use errors::Result;
use parse::parse_verdict;
use prompt::build_match_prompt;

pub use config::JudgeProvider;
pub use errors::{ConfigError, JudgeError};

/// The production judge: one HTTP completion per candidate.
#[derive(Debug, Clone)]
pub struct LlmJudge {
    client: JudgeClient,
}

impl LlmJudge {
    pub fn new(cfg: JudgeConfig) -> Result<Self> {
        Ok(Self {
            client: JudgeClient::new(cfg)?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(JudgeConfig::from_env()?)
    }
}

impl MatchJudge for LlmJudge {
    async fn match_candidate(&self, candidate: &Finding, golden: &[Finding]) -> MatchVerdict {
        // The matcher short-circuits empty golden sets; guard anyway so
        // a misuse cannot produce a pointless judge call.
        if golden.is_empty() {
            return MatchVerdict::no_match("empty golden set");
        }

        let prompt = build_match_prompt(candidate, golden);
        match self.client.generate(&prompt).await {
            Ok(raw) => parse_verdict(&raw),
            Err(e) => {
                warn!(error = %e, "judge call failed after retries; defaulting to no-match");
                MatchVerdict::no_match(format!("judge call failed: {e}"))
            }
        }
    }
}
