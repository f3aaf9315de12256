//! Adapter contract for the semantic-equivalence judge.
//!
//! The judge is an external natural-language capability: given one
//! candidate finding and the golden set of its PR, it decides whether
//! the candidate describes the same underlying issue as any golden
//! finding. The call is a judgment, not a computation — outputs are
//! not assumed idempotent across invocations and are never cached
//! across PRs.
//!
//! The contract is infallible on purpose: adapters absorb transport
//! and parse failures and degrade to [`MatchVerdict::no_match`] with
//! low confidence, so one flaky judge call costs at most one
//! misclassified candidate instead of the whole batch.

use std::future::Future;

use serde::Serialize;

use crate::finding::Finding;

/// Judge's confidence in its own verdict. Unknown strings parse to `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchConfidence {
    High,
    Medium,
    #[default]
    Low,
}

impl MatchConfidence {
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => MatchConfidence::High,
            "medium" => MatchConfidence::Medium,
            _ => MatchConfidence::Low,
        }
    }
}

/// Outcome of comparing one candidate against a golden set.
#[derive(Debug, Clone, Serialize)]
pub struct MatchVerdict {
    pub is_match: bool,
    /// The judge's claim of which golden finding matched. Free text —
    /// possibly paraphrased or severity-prefixed — so the matcher
    /// resolves it back to a concrete golden finding itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_golden: Option<String>,
    pub confidence: MatchConfidence,
    /// Audit/debugging only. Never consulted by scoring logic.
    pub rationale: String,
}

impl MatchVerdict {
    /// Safe default used for short-circuits and degraded judge calls.
    pub fn no_match(rationale: impl Into<String>) -> Self {
        Self {
            is_match: false,
            matched_golden: None,
            confidence: MatchConfidence::Low,
            rationale: rationale.into(),
        }
    }

    pub fn matched(
        golden: impl Into<String>,
        confidence: MatchConfidence,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            is_match: true,
            matched_golden: Some(golden.into()),
            confidence,
            rationale: rationale.into(),
        }
    }
}

/// Single-method seam between the deterministic matcher and the
/// external judge. Scripted fakes implement this in tests.
///
/// Callers must not invoke the judge with an empty `golden` slice —
/// there is nothing to match against, and the matcher short-circuits
/// that case to a false positive itself.
pub trait MatchJudge {
    fn match_candidate(
        &self,
        candidate: &Finding,
        golden: &[Finding],
    ) -> impl Future<Output = MatchVerdict> + Send;
}
