//! Tolerant extraction and fail-soft parsing of judge responses.
//!
//! Models wrap JSON in code fences, prepend prose, or emit something
//! that is not JSON at all. Extraction is deliberately forgiving;
//! parsing never fails hard — an unusable response becomes a no-match
//! verdict with low confidence and the truncated raw text in the
//! rationale, so one bad reply degrades a single candidate instead of
//! aborting the batch.

use serde::Deserialize;
use tracing::warn;

use eval_engine::{MatchConfidence, MatchVerdict};

/// Expected shape of the judge's JSON reply.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    #[serde(default)]
    matches: bool,
    #[serde(default)]
    matched_golden_comment: Option<String>,
    #[serde(default)]
    confidence: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Remove markdown fences and surrounding prose; extract the first
/// `{...}` block. Accepts `{...}` anywhere in the string.
pub fn sanitize_json_block(s: &str) -> String {
    let no_fence = s
        .replace("```json", "")
        .replace("```", "")
        .replace('\u{feff}', "") // BOM
        .trim()
        .to_string();

    if let (Some(start), Some(end)) = (no_fence.find('{'), no_fence.rfind('}'))
        && start < end
    {
        let candidate = &no_fence[start..=end];
        if candidate.contains(':') {
            return candidate.to_string();
        }
    }
    no_fence
}

/// Parse a raw judge response into a verdict. Fail-soft: any shape
/// problem yields a no-match verdict carrying the truncated raw text.
pub fn parse_verdict(raw: &str) -> MatchVerdict {
    let cleaned = sanitize_json_block(raw);
    match serde_json::from_str::<RawVerdict>(&cleaned) {
        Ok(v) => {
            let confidence = v
                .confidence
                .as_deref()
                .map(MatchConfidence::parse_lenient)
                .unwrap_or_default();
            let rationale = v.reasoning.unwrap_or_default();
            match (v.matches, v.matched_golden_comment) {
                (true, Some(golden)) if !golden.trim().is_empty() => {
                    MatchVerdict::matched(golden, confidence, rationale)
                }
                (true, _) => {
                    // "matches" with no named golden comment is not a
                    // usable claim; the matcher would reject it anyway.
                    MatchVerdict {
                        is_match: false,
                        matched_golden: None,
                        confidence: MatchConfidence::Low,
                        rationale: format!("match claimed without a golden comment: {rationale}"),
                    }
                }
                (false, _) => MatchVerdict {
                    is_match: false,
                    matched_golden: None,
                    confidence,
                    rationale,
                },
            }
        }
        Err(e) => {
            warn!(error = %e, raw = %truncate(raw, 200), "unparsable judge response; defaulting to no-match");
            MatchVerdict::no_match(format!(
                "failed to parse judge response: {}",
                truncate(raw, 200)
            ))
        }
    }
}

/// Char-safe truncation for logs and rationales.
pub fn truncate(s: &str, n: usize) -> String {
    if s.chars().count() <= n {
        return s.to_string();
    }
    s.chars().take(n).collect::<String>() + "…"
}
