//! Judge prompt construction.
//!
//! The golden set is rendered one finding per line as `- [severity]
//! text` — the same display form the resolver understands, so a judge
//! that echoes a line back verbatim still resolves cleanly. The answer
//! contract is strict JSON; the parser stays tolerant anyway.

use eval_engine::Finding;

/// Build the matching prompt for one candidate against a golden set.
pub fn build_match_prompt(candidate: &Finding, golden: &[Finding]) -> String {
    let golden_list = golden
        .iter()
        .map(|g| format!("- [{}] {}", g.severity.as_str(), g.text))
        .collect::<Vec<_>>()
        .join("\n");

    let anchor = match &candidate.location {
        Some(loc) => match loc.line {
            Some(line) => format!("\n(reported at {}:{line})", loc.path),
            None => format!("\n(reported in {})", loc.path),
        },
        None => String::new(),
    };

    format!(
        "You are evaluating whether a code review comment from an AI reviewer matches any of the expected findings (golden comments) for a PR.\n\
\n\
GOLDEN COMMENTS (expected findings):\n\
{golden_list}\n\
\n\
REVIEWER'S COMMENT:{anchor}\n\
{body}\n\
\n\
Does the reviewer's comment match ANY of the golden comments? Two comments \"match\" if they describe the same bug/issue, even if worded differently.\n\
\n\
Respond in this exact JSON format:\n\
{{\n\
  \"matches\": true or false,\n\
  \"matched_golden_comment\": \"the golden comment text that matches, or null if no match\",\n\
  \"matched_severity\": \"the severity of the matched golden comment, or null\",\n\
  \"confidence\": \"high\", \"medium\", or \"low\",\n\
  \"reasoning\": \"brief explanation of why this is or isn't a match\"\n\
}}\n\
\n\
Only output the JSON, nothing else.",
        body = candidate.text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use eval_engine::Severity;

    #[test]
    fn renders_golden_lines_with_severity() {
        let golden = vec![
            Finding::golden("SQL injection in query builder", Severity::High),
            Finding::golden("Missing index on lookup", Severity::Low),
        ];
        let candidate = Finding::candidate("raw SQL concatenation").with_location("db.rs", Some(42));

        let prompt = build_match_prompt(&candidate, &golden);
        assert!(prompt.contains("- [high] SQL injection in query builder"));
        assert!(prompt.contains("- [low] Missing index on lookup"));
        assert!(prompt.contains("(reported at db.rs:42)"));
        assert!(prompt.contains("raw SQL concatenation"));
        assert!(prompt.contains("\"matches\": true or false"));
    }
}
