//! `RESULTS.md` rendering.
//!
//! Layout follows the run reports the benchmark has always shipped:
//! a summary metrics table (with signed deltas when a baseline run is
//! supplied), a per-PR breakdown table per repo, and the top/bottom
//! three PRs by F-score.

use crate::summary::{PrEvaluation, RepoEvaluation, RunSummary};

const TITLE_MAX: usize = 50;

/// Render the full Markdown report for one run.
pub fn render_results_md(
    run_name: &str,
    repos: &[RepoEvaluation],
    overall: &RunSummary,
    baseline: Option<&RunSummary>,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    let pr_total: usize = repos.iter().map(|r| r.prs.len()).sum();
    lines.push(format!("# Evaluation Results - {run_name}"));
    lines.push(String::new());
    lines.push(format!(
        "**Date:** {}",
        chrono::Utc::now().format("%Y-%m-%d")
    ));
    lines.push(format!(
        "**Repositories:** {}",
        repos
            .iter()
            .map(|r| r.repo.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    lines.push(format!("**PRs Evaluated:** {pr_total}"));
    lines.push(String::new());
    lines.push("## Summary Metrics".to_string());
    lines.push(String::new());

    match baseline {
        Some(base) => {
            lines.push("| Metric | This Run | Baseline | Change |".to_string());
            lines.push("|--------|----------|----------|--------|".to_string());
            lines.push(count_row("True Positives (TP)", overall.total_tp, base.total_tp));
            lines.push(count_row("False Positives (FP)", overall.total_fp, base.total_fp));
            lines.push(count_row("False Negatives (FN)", overall.total_fn, base.total_fn));
            lines.push(pct_row("Precision", overall.precision, base.precision));
            lines.push(pct_row("Recall", overall.recall, base.recall));
            lines.push(pct_row("F-Score", overall.f_score, base.f_score));
        }
        None => {
            lines.push("| Metric | Value |".to_string());
            lines.push("|--------|-------|".to_string());
            lines.push(format!("| **True Positives (TP)** | {} |", overall.total_tp));
            lines.push(format!("| **False Positives (FP)** | {} |", overall.total_fp));
            lines.push(format!("| **False Negatives (FN)** | {} |", overall.total_fn));
            lines.push(format!("| **Precision** | {:.1}% |", overall.precision));
            lines.push(format!("| **Recall** | {:.1}% |", overall.recall));
            lines.push(format!("| **F-Score** | {:.1}% |", overall.f_score));
        }
    }

    lines.push(String::new());
    lines.push("## Per-PR Breakdown".to_string());

    for repo in repos {
        lines.push(String::new());
        lines.push(format!("### {}", repo.repo));
        lines.push(String::new());
        lines.push(
            "| PR # | Title | Golden | Agent | TP | Dup | FP | FN | Precision | Recall |"
                .to_string(),
        );
        lines.push(
            "|------|-------|--------|-------|----|-----|----|----|-----------|--------|"
                .to_string(),
        );
        for pr in &repo.prs {
            let m = &pr.metrics;
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} | {:.1}% | {:.1}% |",
                pr.pr_number,
                shorten(&pr.pr_title),
                pr.golden_count,
                pr.candidate_count,
                m.tp,
                m.duplicates,
                m.fp,
                m.fn_,
                m.precision,
                m.recall,
            ));
        }
        lines.push(String::new());
        lines.push(format!(
            "**{}**: TP={}, FP={}, FN={} — Precision {:.1}%, Recall {:.1}%, F-Score {:.1}%",
            repo.repo,
            repo.summary.total_tp,
            repo.summary.total_fp,
            repo.summary.total_fn,
            repo.summary.precision,
            repo.summary.recall,
            repo.summary.f_score,
        ));
    }

    // Top/bottom PRs by F-score across all repos.
    let mut ranked: Vec<(&str, &PrEvaluation)> = repos
        .iter()
        .flat_map(|r| r.prs.iter().map(move |p| (r.repo.as_str(), p)))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.metrics
            .f_score
            .partial_cmp(&a.1.metrics.f_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if !ranked.is_empty() {
        lines.push(String::new());
        lines.push("## Detailed Analysis".to_string());
        lines.push(String::new());
        lines.push("### Top Performing PRs (by F-Score)".to_string());
        lines.push(String::new());
        for &(repo, pr) in ranked.iter().take(3) {
            push_ranked_entry(&mut lines, repo, pr);
        }
        lines.push("### Lowest Performing PRs (by F-Score)".to_string());
        lines.push(String::new());
        for &(repo, pr) in ranked.iter().rev().take(3) {
            push_ranked_entry(&mut lines, repo, pr);
        }
    }

    lines.join("\n") + "\n"
}

fn push_ranked_entry(lines: &mut Vec<String>, repo: &str, pr: &PrEvaluation) {
    let m = &pr.metrics;
    lines.push(format!(
        "**{repo} PR #{}: {}**",
        pr.pr_number, pr.pr_title
    ));
    lines.push(format!(
        "- F-Score: {:.1}% (Precision: {:.1}%, Recall: {:.1}%)",
        m.f_score, m.precision, m.recall
    ));
    lines.push(format!("- TP={}, FP={}, FN={}", m.tp, m.fp, m.fn_));
    lines.push(String::new());
}

fn count_row(label: &str, current: usize, baseline: usize) -> String {
    let delta = current as i64 - baseline as i64;
    format!("| **{label}** | {current} | {baseline} | {delta:+} |")
}

fn pct_row(label: &str, current: f64, baseline: f64) -> String {
    format!(
        "| **{label}** | {current:.1}% | {baseline:.1}% | {:+.1}% |",
        current - baseline
    )
}

fn shorten(title: &str) -> String {
    if title.chars().count() > TITLE_MAX {
        let cut: String = title.chars().take(TITLE_MAX).collect();
        format!("{cut}...")
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eval_engine::{Finding, Judged, MatchConfidence, MatchVerdict, PrOutcome, Severity};

    fn sample_repo() -> RepoEvaluation {
        let mut good = PrOutcome::default();
        good.true_positives.push(Judged {
            finding: Finding::candidate("found it"),
            verdict: MatchVerdict::matched("the bug", MatchConfidence::High, "same"),
        });

        let mut bad = PrOutcome::default();
        bad.false_positives.push(Judged {
            finding: Finding::candidate("noise"),
            verdict: MatchVerdict::no_match("unrelated"),
        });
        bad.false_negatives
            .push(Finding::golden("missed", Severity::High));

        RepoEvaluation::new(
            "droid-sentry",
            vec![
                PrEvaluation::new(6, "Enhanced Pagination Performance for High-Volume Audit Logs", good),
                PrEvaluation::new(7, "short title", bad),
            ],
        )
    }

    #[test]
    fn renders_summary_and_breakdown_tables() {
        let repo = sample_repo();
        let overall = repo.summary;
        let md = render_results_md("run_2026-08-30", &[repo], &overall, None);

        assert!(md.contains("# Evaluation Results - run_2026-08-30"));
        assert!(md.contains("| **True Positives (TP)** | 1 |"));
        assert!(md.contains("### droid-sentry"));
        // Long title truncated at 50 chars with ellipsis.
        assert!(md.contains("Enhanced Pagination Performance for High-Volume Au..."));
        assert!(md.contains("### Top Performing PRs (by F-Score)"));
    }

    #[test]
    fn baseline_adds_signed_delta_column() {
        let repo = sample_repo();
        let overall = repo.summary;
        let baseline = RunSummary {
            total_tp: 3,
            total_fp: 1,
            total_fn: 0,
            precision: 75.0,
            recall: 100.0,
            f_score: 85.7,
        };
        let md = render_results_md("run", &[repo], &overall, Some(&baseline));
        assert!(md.contains("| Metric | This Run | Baseline | Change |"));
        assert!(md.contains("| **True Positives (TP)** | 1 | 3 | -2 |"));
        assert!(md.contains("-50.0%"));
    }
}
