//! Precision / recall / F-score derivation.
//!
//! Counts come from [`PrOutcome`](crate::matcher::PrOutcome)s; true
//! positives deliberately exclude duplicates, so a judge that
//! double-reports the same underlying issue cannot inflate either
//! precision or recall. All ratios are computed in full `f64`
//! precision and only rounded (one decimal, as percentages) for
//! presentation.

use serde::Serialize;

use crate::matcher::PrOutcome;

/// Raw outcome counts for one PR or a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub tp: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
}

impl Counts {
    pub fn new(tp: usize, fp: usize, fn_: usize) -> Self {
        Self { tp, fp, fn_ }
    }
}

impl From<&PrOutcome> for Counts {
    fn from(outcome: &PrOutcome) -> Self {
        // Duplicates are excluded from tp on purpose.
        Counts {
            tp: outcome.tp_count(),
            fp: outcome.fp_count(),
            fn_: outcome.fn_count(),
        }
    }
}

/// Derived metrics, as percentages rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub f_score: f64,
}

impl Metrics {
    /// Compute metrics from raw counts.
    ///
    /// Zero-denominator cases are defined as `0`, not an error:
    /// `tp + fp == 0` → precision 0; `tp + fn == 0` → recall 0;
    /// `precision + recall == 0` → F-score 0.
    pub fn from_counts(c: Counts) -> Self {
        let tp = c.tp as f64;
        let precision = if c.tp + c.fp > 0 {
            tp / (c.tp + c.fp) as f64
        } else {
            0.0
        };
        let recall = if c.tp + c.fn_ > 0 {
            tp / (c.tp + c.fn_) as f64
        } else {
            0.0
        };
        let f_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Metrics {
            precision: round_pct(precision),
            recall: round_pct(recall),
            f_score: round_pct(f_score),
        }
    }
}

/// Running totals across PRs. An explicit value owned by the batch
/// driver — one `fold` per completed PR, nothing process-global.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunTotals {
    counts: Counts,
    prs: usize,
    skipped: usize,
}

impl RunTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completed PR's counts into the totals.
    pub fn fold(&mut self, c: Counts) {
        self.counts.tp += c.tp;
        self.counts.fp += c.fp;
        self.counts.fn_ += c.fn_;
        self.prs += 1;
    }

    /// Record a PR skipped for missing golden data (excluded from metrics).
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn counts(&self) -> Counts {
        self.counts
    }

    pub fn prs_evaluated(&self) -> usize {
        self.prs
    }

    pub fn prs_skipped(&self) -> usize {
        self.skipped
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::from_counts(self.counts)
    }
}

/// Fraction → percentage rounded to one decimal (`0.667 → 66.7`).
fn round_pct(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_numbers() {
        // tp=1, fp=1, fn=0 → precision 50.0, recall 100.0, f 66.7.
        let m = Metrics::from_counts(Counts::new(1, 1, 0));
        assert_eq!(m.precision, 50.0);
        assert_eq!(m.recall, 100.0);
        assert_eq!(m.f_score, 66.7);
    }

    #[test]
    fn zero_denominators_yield_zero() {
        let m = Metrics::from_counts(Counts::new(0, 0, 0));
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f_score, 0.0);

        // Golden set empty for every PR: only false positives.
        let m = Metrics::from_counts(Counts::new(0, 7, 0));
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);

        // No candidates at all: only false negatives.
        let m = Metrics::from_counts(Counts::new(0, 0, 4));
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f_score, 0.0);
    }

    #[test]
    fn rounding_is_one_decimal_on_full_precision() {
        // 2/3 precision, 2/3 recall → F = 2/3 → 66.7 after rounding.
        let m = Metrics::from_counts(Counts::new(2, 1, 1));
        assert_eq!(m.precision, 66.7);
        assert_eq!(m.recall, 66.7);
        assert_eq!(m.f_score, 66.7);
    }

    #[test]
    fn totals_accumulate_per_pr() {
        let mut totals = RunTotals::new();
        totals.fold(Counts::new(1, 1, 0));
        totals.fold(Counts::new(2, 0, 3));
        totals.record_skip();

        assert_eq!(totals.counts(), Counts::new(3, 1, 3));
        assert_eq!(totals.prs_evaluated(), 2);
        assert_eq!(totals.prs_skipped(), 1);

        let m = totals.metrics();
        assert_eq!(m.precision, 75.0);
        assert_eq!(m.recall, 50.0);
        assert_eq!(m.f_score, 60.0);
    }
}
