//! Normalized representation of one review finding.
//!
//! Both sides of the evaluation use the same shape: golden findings
//! (hand-validated ground truth per PR) and candidate findings (what
//! the agent actually posted). A finding is immutable for the duration
//! of a run; its `identity()` is the stable key used for duplicate
//! attribution.

use serde::{Deserialize, Serialize};

/// Severity of a finding. Upstream data that omits or mangles the
/// severity defaults to `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    /// Lenient parse used at ingestion; anything unrecognized is `Medium`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "low" => Severity::Low,
            _ => Severity::Medium,
        }
    }

    /// Display form used in prompts and reports (`critical`, `high`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// Which side of the evaluation a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Ground truth, hand-validated.
    Golden,
    /// Produced by the agent under evaluation.
    Candidate,
}

/// Optional code anchor of a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
}

/// One reviewed observation, golden or candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Free-form description. Non-empty for any finding that survived
    /// ingestion.
    pub text: String,
    /// Anchor, when the finding points at a specific file/line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub severity: Severity,
    pub origin: Origin,
    /// Explicit stable id when upstream provides one (golden v2 data
    /// carries bug ids); otherwise identity falls back to the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Finding {
    pub fn golden(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            location: None,
            severity,
            origin: Origin::Golden,
            id: None,
        }
    }

    pub fn candidate(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            location: None,
            severity: Severity::Medium,
            origin: Origin::Candidate,
            id: None,
        }
    }

    pub fn with_location(mut self, path: impl Into<String>, line: Option<u64>) -> Self {
        self.location = Some(Location {
            path: path.into(),
            line,
        });
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Stable key for duplicate attribution: the explicit id when
    /// present, else the normalized text. Two findings with the same
    /// identity are the same underlying issue.
    pub fn identity(&self) -> String {
        match &self.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => normalize_text(&self.text),
        }
    }
}

/// Text normalization backing identity: trim, collapse inner
/// whitespace, lowercase. Keeps paraphrase detection out of scope —
/// that is the judge's job, not the identity's.
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_prefers_explicit_id() {
        let f = Finding::golden("SQL injection in query builder", Severity::High).with_id("g1");
        assert_eq!(f.identity(), "g1");
    }

    #[test]
    fn identity_normalizes_text() {
        let a = Finding::candidate("  Missing   null check\non config ");
        let b = Finding::candidate("missing null check on config");
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn blank_id_falls_back_to_text() {
        let f = Finding::golden("off-by-one in pagination", Severity::Medium).with_id("  ");
        assert_eq!(f.identity(), "off-by-one in pagination");
    }

    #[test]
    fn severity_parse_is_lenient() {
        assert_eq!(Severity::parse_lenient("Critical"), Severity::Critical);
        assert_eq!(Severity::parse_lenient(" HIGH "), Severity::High);
        assert_eq!(Severity::parse_lenient("unknown"), Severity::Medium);
        assert_eq!(Severity::parse_lenient(""), Severity::Medium);
    }
}
