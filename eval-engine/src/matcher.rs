//! PR matcher: classify candidate findings against a golden set.
//!
//! Candidates are processed strictly in input order — order is
//! load-bearing, because the first candidate to claim a golden finding
//! is the true positive and every later claimant of the same golden
//! identity is a duplicate. The judge decides *whether* a candidate
//! matches; this module decides *which* golden finding it matched and
//! keeps the bookkeeping honest.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::finding::{Finding, normalize_text};
use crate::judge::{MatchJudge, MatchVerdict};

/// A candidate finding together with the verdict that classified it.
#[derive(Debug, Clone, Serialize)]
pub struct Judged {
    pub finding: Finding,
    pub verdict: MatchVerdict,
}

/// Classification result for one pull request.
///
/// Partition invariants hold by construction:
/// `|tp| + |dup| + |fp| == |candidates|` and `|tp| + |fn| == |golden|`
/// (with duplicated golden identities merged into one target).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrOutcome {
    pub true_positives: Vec<Judged>,
    pub duplicates: Vec<Judged>,
    pub false_positives: Vec<Judged>,
    pub false_negatives: Vec<Finding>,
}

impl PrOutcome {
    pub fn tp_count(&self) -> usize {
        self.true_positives.len()
    }
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }
    pub fn fp_count(&self) -> usize {
        self.false_positives.len()
    }
    pub fn fn_count(&self) -> usize {
        self.false_negatives.len()
    }
}

/// Resolve a judge's free-text claim back to a concrete golden finding.
///
/// The claim may be paraphrased, truncated, or carry the `[severity]`
/// prefix the judge saw in its prompt, so resolution is a fixed
/// precedence chain rather than an equality check:
///
/// 1. exact — claim equals the golden text or its identity;
/// 2. containment — golden text inside the claim, claim inside the
///    golden text, or claim inside the `[severity] text` display form;
/// 3. fail — `None`; the match claim is unusable.
///
/// First golden finding (input order) to satisfy a rule wins, which
/// also merges defensively tolerated duplicate golden identities into
/// a single target.
pub fn resolve_golden(claim: &str, golden: &[Finding]) -> Option<usize> {
    let claim_norm = normalize_text(claim);
    if claim_norm.is_empty() {
        return None;
    }

    // Pass 1: exact.
    for (i, g) in golden.iter().enumerate() {
        if claim_norm == normalize_text(&g.text) || claim_norm == g.identity() {
            return Some(i);
        }
    }

    // Pass 2: containment, either direction, including the prompt's
    // "[severity] text" rendering.
    for (i, g) in golden.iter().enumerate() {
        let text_norm = normalize_text(&g.text);
        let display_norm = normalize_text(&format!("[{}] {}", g.severity.as_str(), g.text));
        if claim_norm.contains(&text_norm)
            || text_norm.contains(&claim_norm)
            || display_norm.contains(&claim_norm)
        {
            return Some(i);
        }
    }

    None
}

/// Classify one PR's candidates against its golden findings.
///
/// Deterministic given the judge's outputs. An empty golden set never
/// reaches the judge: every candidate is a false positive immediately.
pub async fn classify<J: MatchJudge>(
    judge: &J,
    candidates: &[Finding],
    golden: &[Finding],
) -> PrOutcome {
    let mut outcome = PrOutcome::default();
    let mut claimed: HashSet<String> = HashSet::new();

    // Golden identities are expected unique per PR; tolerate violations
    // but say so, since duplicated entries collapse into one target.
    {
        let mut seen = HashSet::new();
        for g in golden {
            if !seen.insert(g.identity()) {
                warn!(identity = %g.identity(), "duplicate golden identity in one PR; treating as a single target");
            }
        }
    }

    for (idx, candidate) in candidates.iter().enumerate() {
        if golden.is_empty() {
            debug!(idx, "golden set empty; candidate is a false positive without judging");
            outcome.false_positives.push(Judged {
                finding: candidate.clone(),
                verdict: MatchVerdict::no_match("no golden findings for this PR"),
            });
            continue;
        }

        let verdict = judge.match_candidate(candidate, golden).await;

        if !verdict.is_match {
            debug!(idx, "verdict: no match");
            outcome.false_positives.push(Judged {
                finding: candidate.clone(),
                verdict,
            });
            continue;
        }

        let resolved = verdict
            .matched_golden
            .as_deref()
            .and_then(|claim| resolve_golden(claim, golden));

        match resolved {
            None => {
                // Match claim names nothing we can associate with a
                // golden finding; the claim is unusable.
                warn!(
                    idx,
                    claim = verdict.matched_golden.as_deref().unwrap_or(""),
                    "match verdict could not be resolved to a golden finding; counting as false positive"
                );
                outcome.false_positives.push(Judged {
                    finding: candidate.clone(),
                    verdict,
                });
            }
            Some(gi) => {
                let identity = golden[gi].identity();
                if claimed.contains(&identity) {
                    debug!(idx, golden = gi, "golden already claimed; candidate is a duplicate");
                    outcome.duplicates.push(Judged {
                        finding: candidate.clone(),
                        verdict,
                    });
                } else {
                    debug!(idx, golden = gi, "first claim; candidate is a true positive");
                    claimed.insert(identity);
                    outcome.true_positives.push(Judged {
                        finding: candidate.clone(),
                        verdict,
                    });
                }
            }
        }
    }

    for g in golden {
        if !claimed.contains(&g.identity())
            && !outcome
                .false_negatives
                .iter()
                .any(|f| f.identity() == g.identity())
        {
            outcome.false_negatives.push(g.clone());
        }
    }

    outcome
}
