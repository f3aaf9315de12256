//! Ingestion filter: raw records → ordered findings.
//!
//! Everything the matcher must never see is stopped here: records with
//! no text (MalformedInputRecord — rejected with a warning), the
//! agent's `....` placeholder bodies, and transient "Droid is working"
//! progress messages. Ordering of surviving records is preserved —
//! downstream duplicate attribution depends on it.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::finding::{Finding, Severity};

/// Placeholder body the agent posts as a no-op review.
const PLACEHOLDER_BODY: &str = "....";
/// Progress message posted while the agent is still reviewing.
const PROGRESS_MARKER: &str = "Droid is working";

/// One raw agent comment, as loaded from the fetched-comments JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateRecord {
    #[serde(default, alias = "text")]
    pub body: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub line: Option<u64>,
    #[serde(default)]
    pub severity: Option<String>,
}

/// One raw golden comment, as loaded from the golden JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenRecord {
    #[serde(default, alias = "description", alias = "text")]
    pub comment: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// Filter raw agent comments into candidate findings.
pub fn candidate_findings(records: &[CandidateRecord]) -> Vec<Finding> {
    let mut out = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let body = rec.body.trim();
        if body.is_empty() {
            warn!(index = i, "candidate record has no text; rejected");
            continue;
        }
        if body == PLACEHOLDER_BODY {
            debug!(index = i, "placeholder candidate body skipped");
            continue;
        }
        if body.contains(PROGRESS_MARKER) {
            debug!(index = i, "in-progress candidate body skipped");
            continue;
        }

        let mut finding = Finding::candidate(rec.body.clone());
        if let Some(sev) = &rec.severity {
            finding.severity = Severity::parse_lenient(sev);
        }
        if let Some(path) = &rec.path {
            finding = finding.with_location(path.clone(), rec.line);
        }
        out.push(finding);
    }
    out
}

/// Filter raw golden comments into golden findings.
///
/// Duplicate identities within one PR violate the golden-set contract;
/// they are kept (resolution merges them into one target) but flagged.
pub fn golden_findings(records: &[GoldenRecord]) -> Vec<Finding> {
    let mut out: Vec<Finding> = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        if rec.comment.trim().is_empty() {
            warn!(index = i, "golden record has no text; rejected");
            continue;
        }

        let severity = rec
            .severity
            .as_deref()
            .map(Severity::parse_lenient)
            .unwrap_or_default();
        let mut finding = Finding::golden(rec.comment.clone(), severity);
        if let Some(id) = &rec.id {
            finding = finding.with_id(id.clone());
        }

        if out.iter().any(|g| g.identity() == finding.identity()) {
            warn!(index = i, identity = %finding.identity(), "duplicate golden identity within one PR");
        }
        out.push(finding);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Severity;

    fn rec(body: &str) -> CandidateRecord {
        CandidateRecord {
            body: body.to_string(),
            path: None,
            line: None,
            severity: None,
        }
    }

    #[test]
    fn rejects_empty_and_placeholder_bodies() {
        let records = vec![
            rec(""),
            rec("   "),
            rec("...."),
            rec("Droid is working on this PR..."),
            rec("Actual finding about a bug"),
        ];
        let findings = candidate_findings(&records);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].text, "Actual finding about a bug");
    }

    #[test]
    fn preserves_input_order_and_anchors() {
        let mut first = rec("first");
        first.path = Some("src/a.rs".into());
        first.line = Some(12);
        let records = vec![first, rec("second")];

        let findings = candidate_findings(&records);
        assert_eq!(findings[0].text, "first");
        assert_eq!(findings[1].text, "second");
        let loc = findings[0].location.as_ref().unwrap();
        assert_eq!(loc.path, "src/a.rs");
        assert_eq!(loc.line, Some(12));
        assert!(findings[1].location.is_none());
    }

    #[test]
    fn golden_defaults_severity_to_medium() {
        let records = vec![
            GoldenRecord {
                comment: "bug one".into(),
                severity: None,
                id: None,
            },
            GoldenRecord {
                comment: "bug two".into(),
                severity: Some("critical".into()),
                id: Some("g2".into()),
            },
            GoldenRecord {
                comment: " ".into(),
                severity: Some("high".into()),
                id: None,
            },
        ];
        let findings = golden_findings(&records);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert_eq!(findings[1].severity, Severity::Critical);
        assert_eq!(findings[1].identity(), "g2");
    }
}
