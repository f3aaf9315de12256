//! Batch evaluation loop: repos → PRs → matcher → artifacts.

use std::time::Instant;

use tracing::{debug, info, warn};

use eval_engine::{MatchJudge, RunTotals, classify, ingest};
use report_gen::{PrEvaluation, RepoEvaluation, RunSummary};

use crate::config::RunConfig;
use crate::data;

/// Evaluate every PR of one repo. PRs without a golden entry are
/// skipped with a visible warning and excluded from the totals.
pub async fn evaluate_repo<J: MatchJudge>(
    judge: &J,
    cfg: &RunConfig,
    repo: &str,
    totals: &mut RunTotals,
) -> anyhow::Result<RepoEvaluation> {
    let t0 = Instant::now();
    info!(repo, "evaluating repo");

    let candidates = data::load_candidates(&cfg.candidates_path(repo)).await?;
    if !candidates.repo.is_empty() && candidates.repo != repo {
        warn!(repo, file_repo = %candidates.repo, "candidate file names a different repo");
    }
    let golden = data::load_golden(&cfg.golden_path(repo)).await?;
    let golden_by_title = data::golden_by_title(golden);

    let mut prs: Vec<PrEvaluation> = Vec::with_capacity(candidates.prs.len());

    for pr in &candidates.prs {
        let Some(golden_records) = golden_by_title.get(&pr.title) else {
            warn!(
                repo,
                pr = pr.number,
                title = %pr.title,
                "no golden comments for PR; skipping"
            );
            totals.record_skip();
            continue;
        };

        let golden_findings = ingest::golden_findings(golden_records);
        let candidate_findings = ingest::candidate_findings(&pr.review_comments);
        debug!(
            pr = pr.number,
            golden = golden_findings.len(),
            candidates = candidate_findings.len(),
            "classifying PR"
        );

        let outcome = classify(judge, &candidate_findings, &golden_findings).await;
        let eval = PrEvaluation::new(pr.number, pr.title.clone(), outcome);

        info!(
            repo,
            pr = pr.number,
            tp = eval.metrics.tp,
            dup = eval.metrics.duplicates,
            fp = eval.metrics.fp,
            missed = eval.metrics.fn_,
            "PR evaluated"
        );

        // Single accumulation step per completed PR.
        totals.fold(eval_engine::Counts::new(
            eval.metrics.tp,
            eval.metrics.fp,
            eval.metrics.fn_,
        ));
        prs.push(eval);
    }

    let repo_eval = RepoEvaluation::new(repo, prs);
    info!(
        repo,
        prs = repo_eval.prs.len(),
        tp = repo_eval.summary.total_tp,
        fp = repo_eval.summary.total_fp,
        missed = repo_eval.summary.total_fn,
        precision = repo_eval.summary.precision,
        recall = repo_eval.summary.recall,
        f_score = repo_eval.summary.f_score,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "repo done"
    );

    Ok(repo_eval)
}

/// Run the whole batch and persist artifacts. Returns the per-repo
/// evaluations and the run-wide summary for console reporting.
pub async fn run_batch<J: MatchJudge>(
    judge: &J,
    cfg: &RunConfig,
) -> anyhow::Result<(Vec<RepoEvaluation>, RunSummary)> {
    let mut totals = RunTotals::new();
    let mut repo_evals: Vec<RepoEvaluation> = Vec::with_capacity(cfg.repos.len());

    for repo in &cfg.repos {
        let eval = evaluate_repo(judge, cfg, repo, &mut totals).await?;
        report_gen::store::write_repo_eval(&cfg.out_dir, &eval).await?;
        repo_evals.push(eval);
    }

    let overall = RunSummary::from_totals(&totals);
    report_gen::store::write_overall_summary(&cfg.out_dir, &overall).await?;

    let baseline = match &cfg.baseline {
        Some(path) => {
            let data = tokio::fs::read(path).await?;
            Some(serde_json::from_slice::<RunSummary>(&data)?)
        }
        None => None,
    };

    let markdown = report_gen::markdown::render_results_md(
        &cfg.run_name(),
        &repo_evals,
        &overall,
        baseline.as_ref(),
    );
    report_gen::store::write_results_md(&cfg.out_dir, &markdown).await?;

    if totals.prs_skipped() > 0 {
        warn!(
            skipped = totals.prs_skipped(),
            "some PRs were skipped for missing golden data and are excluded from metrics"
        );
    }

    Ok((repo_evals, overall))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eval_engine::{Finding, MatchConfidence, MatchVerdict};
    use std::path::PathBuf;

    /// Matches when the candidate text shares a word with a golden text.
    struct WordOverlapJudge;

    impl MatchJudge for WordOverlapJudge {
        async fn match_candidate(&self, candidate: &Finding, golden: &[Finding]) -> MatchVerdict {
            for g in golden {
                let shared = g.text.split_whitespace().any(|w| {
                    w.len() > 4 && candidate.text.to_lowercase().contains(&w.to_lowercase())
                });
                if shared {
                    return MatchVerdict::matched(g.text.clone(), MatchConfidence::High, "overlap");
                }
            }
            MatchVerdict::no_match("no overlap")
        }
    }

    async fn write_fixture(dir: &PathBuf) {
        tokio::fs::create_dir_all(dir).await.unwrap();
        tokio::fs::write(
            dir.join("droid-demo.json"),
            r#"{
                "repo": "droid-demo",
                "prs": [
                    {"number": 1, "title": "Add pagination",
                     "review_comments": [
                        {"body": "pagination cursor is never advanced"},
                        {"body": "...."}
                     ]},
                    {"number": 2, "title": "Unmapped PR",
                     "review_comments": [{"body": "something"}]}
                ]
            }"#,
        )
        .await
        .unwrap();
        tokio::fs::write(
            dir.join("golden_demo.json"),
            r#"[
                {"pr_title": "Add pagination",
                 "comments": [
                    {"severity": "high", "comment": "cursor not advanced causes infinite pagination loop"},
                    {"severity": "low", "comment": "missing limit validation"}
                 ]}
            ]"#,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn missing_golden_prs_are_skipped_not_fatal() {
        let base = std::env::temp_dir().join(format!("review-bench-test-{}", std::process::id()));
        let data_dir = base.join("data");
        write_fixture(&data_dir).await;

        let cfg = RunConfig {
            data_dir,
            out_dir: base.join("out"),
            repos: vec!["droid-demo".into()],
            baseline: None,
        };

        let mut totals = RunTotals::new();
        let eval = evaluate_repo(&WordOverlapJudge, &cfg, "droid-demo", &mut totals)
            .await
            .unwrap();

        // PR 2 skipped; PR 1 evaluated with the placeholder filtered.
        assert_eq!(eval.prs.len(), 1);
        assert_eq!(totals.prs_skipped(), 1);
        assert_eq!(totals.prs_evaluated(), 1);
        let pr = &eval.prs[0];
        assert_eq!(pr.candidate_count, 1);
        assert_eq!(pr.metrics.tp, 1);
        assert_eq!(pr.metrics.fn_, 1);

        tokio::fs::remove_dir_all(&base).await.unwrap();
    }

    #[tokio::test]
    async fn run_batch_writes_all_artifacts() {
        let base = std::env::temp_dir().join(format!("review-bench-batch-{}", std::process::id()));
        let data_dir = base.join("data");
        write_fixture(&data_dir).await;

        let cfg = RunConfig {
            data_dir,
            out_dir: base.join("run_test"),
            repos: vec!["droid-demo".into()],
            baseline: None,
        };

        let (repos, overall) = run_batch(&WordOverlapJudge, &cfg).await.unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(overall.total_tp, 1);

        assert!(cfg
            .out_dir
            .join("evaluations/droid-demo_eval.json")
            .exists());
        assert!(cfg
            .out_dir
            .join("evaluations/overall_summary.json")
            .exists());
        assert!(cfg.out_dir.join("RESULTS.md").exists());

        tokio::fs::remove_dir_all(&base).await.unwrap();
    }
}
