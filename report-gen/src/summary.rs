//! Serializable result shapes for persisted evaluation artifacts.
//!
//! Field names follow the original artifact layout (`pr_number`,
//! `golden_count`, `metrics.{tp,fp,fn,...}`) so downstream consumers
//! of existing run directories keep working.

use serde::{Deserialize, Serialize};

use eval_engine::{Counts, Judged, Metrics, PrOutcome, RunTotals};

/// The `metrics` block persisted per PR and per run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricsBlock {
    pub tp: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
    pub duplicates: usize,
    pub precision: f64,
    pub recall: f64,
    pub f_score: f64,
}

impl MetricsBlock {
    fn new(counts: Counts, duplicates: usize) -> Self {
        let m = Metrics::from_counts(counts);
        Self {
            tp: counts.tp,
            fp: counts.fp,
            fn_: counts.fn_,
            duplicates,
            precision: m.precision,
            recall: m.recall,
            f_score: m.f_score,
        }
    }
}

/// Classification result for one pull request, as persisted.
#[derive(Debug, Clone, Serialize)]
pub struct PrEvaluation {
    pub pr_number: u64,
    pub pr_title: String,
    pub golden_count: usize,
    pub candidate_count: usize,
    pub true_positives: Vec<Judged>,
    pub duplicates: Vec<Judged>,
    pub false_positives: Vec<Judged>,
    pub false_negatives: Vec<eval_engine::Finding>,
    pub metrics: MetricsBlock,
}

impl PrEvaluation {
    pub fn new(pr_number: u64, pr_title: impl Into<String>, outcome: PrOutcome) -> Self {
        let counts = Counts::from(&outcome);
        let duplicates = outcome.duplicate_count();
        let golden_count = outcome.tp_count() + outcome.fn_count();
        let candidate_count = outcome.tp_count() + duplicates + outcome.fp_count();
        Self {
            pr_number,
            pr_title: pr_title.into(),
            golden_count,
            candidate_count,
            true_positives: outcome.true_positives,
            duplicates: outcome.duplicates,
            false_positives: outcome.false_positives,
            false_negatives: outcome.false_negatives,
            metrics: MetricsBlock::new(counts, duplicates),
        }
    }
}

/// All evaluated PRs of one reference repository plus its summary.
#[derive(Debug, Clone, Serialize)]
pub struct RepoEvaluation {
    pub repo: String,
    pub prs: Vec<PrEvaluation>,
    pub summary: RunSummary,
}

impl RepoEvaluation {
    pub fn new(repo: impl Into<String>, prs: Vec<PrEvaluation>) -> Self {
        let mut totals = RunTotals::new();
        for pr in &prs {
            totals.fold(Counts::new(pr.metrics.tp, pr.metrics.fp, pr.metrics.fn_));
        }
        Self {
            repo: repo.into(),
            prs,
            summary: RunSummary::from_totals(&totals),
        }
    }
}

/// Aggregate counts and metrics, per repo or per run.
/// Deserializable so a prior run's summary can serve as a baseline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_tp: usize,
    pub total_fp: usize,
    pub total_fn: usize,
    pub precision: f64,
    pub recall: f64,
    pub f_score: f64,
}

impl RunSummary {
    pub fn from_totals(totals: &RunTotals) -> Self {
        let c = totals.counts();
        let m = totals.metrics();
        Self {
            total_tp: c.tp,
            total_fp: c.fp,
            total_fn: c.fn_,
            precision: m.precision,
            recall: m.recall,
            f_score: m.f_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eval_engine::{Finding, MatchConfidence, MatchVerdict, Severity};

    fn outcome_one_of_each() -> PrOutcome {
        let mut o = PrOutcome::default();
        let tp = Finding::candidate("found the bug");
        o.true_positives.push(Judged {
            finding: tp,
            verdict: MatchVerdict::matched("the bug", MatchConfidence::High, "same issue"),
        });
        o.duplicates.push(Judged {
            finding: Finding::candidate("found the bug again"),
            verdict: MatchVerdict::matched("the bug", MatchConfidence::Medium, "same issue"),
        });
        o.false_positives.push(Judged {
            finding: Finding::candidate("not a bug"),
            verdict: MatchVerdict::no_match("unrelated"),
        });
        o.false_negatives
            .push(Finding::golden("missed bug", Severity::High));
        o
    }

    #[test]
    fn pr_evaluation_counts_reconstruct_inputs() {
        let eval = PrEvaluation::new(7, "Optimize spans buffer insertion", outcome_one_of_each());
        assert_eq!(eval.candidate_count, 3);
        assert_eq!(eval.golden_count, 2);
        assert_eq!(eval.metrics.tp, 1);
        assert_eq!(eval.metrics.duplicates, 1);
        assert_eq!(eval.metrics.fp, 1);
        assert_eq!(eval.metrics.fn_, 1);
        assert_eq!(eval.metrics.precision, 50.0);
        assert_eq!(eval.metrics.recall, 50.0);
    }

    #[test]
    fn repo_summary_aggregates_pr_counts() {
        let prs = vec![
            PrEvaluation::new(1, "a", outcome_one_of_each()),
            PrEvaluation::new(2, "b", outcome_one_of_each()),
        ];
        let repo = RepoEvaluation::new("droid-sentry", prs);
        assert_eq!(repo.summary.total_tp, 2);
        assert_eq!(repo.summary.total_fp, 2);
        assert_eq!(repo.summary.total_fn, 2);
        assert_eq!(repo.summary.precision, 50.0);
    }

    #[test]
    fn metrics_block_serializes_fn_keyword() {
        let eval = PrEvaluation::new(1, "a", outcome_one_of_each());
        let json = serde_json::to_value(&eval.metrics).unwrap();
        assert_eq!(json["fn"], 1);
        assert_eq!(json["duplicates"], 1);
    }
}
