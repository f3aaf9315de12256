//! JSON artifact persistence (pretty-printed, directories created).

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::info;

use crate::errors::Result;
use crate::summary::{RepoEvaluation, RunSummary};

/// Write any serializable value as pretty JSON, creating parent dirs.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).await?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    fs::write(path, json).await?;
    info!(path = %path.display(), "artifact written");
    Ok(())
}

/// Path of the per-repo evaluation artifact inside a run directory.
pub fn repo_eval_path(out_dir: &Path, repo: &str) -> PathBuf {
    out_dir.join("evaluations").join(format!("{repo}_eval.json"))
}

/// Path of the run-wide summary artifact.
pub fn overall_summary_path(out_dir: &Path) -> PathBuf {
    out_dir.join("evaluations").join("overall_summary.json")
}

pub async fn write_repo_eval(out_dir: &Path, eval: &RepoEvaluation) -> Result<()> {
    write_json(&repo_eval_path(out_dir, &eval.repo), eval).await
}

pub async fn write_overall_summary(out_dir: &Path, summary: &RunSummary) -> Result<()> {
    write_json(&overall_summary_path(out_dir), summary).await
}

pub async fn write_results_md(out_dir: &Path, markdown: &str) -> Result<()> {
    let path = out_dir.join("RESULTS.md");
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).await?;
    }
    fs::write(&path, markdown).await?;
    info!(path = %path.display(), "artifact written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_follow_run_layout() {
        let out = Path::new("results/run_2026-01-13");
        assert_eq!(
            repo_eval_path(out, "droid-sentry"),
            Path::new("results/run_2026-01-13/evaluations/droid-sentry_eval.json")
        );
        assert_eq!(
            overall_summary_path(out),
            Path::new("results/run_2026-01-13/evaluations/overall_summary.json")
        );
    }

    #[tokio::test]
    async fn write_json_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("report-gen-test-{}", std::process::id()));
        let path = dir.join("nested").join("value.json");
        write_json(&path, &serde_json::json!({"ok": true}))
            .await
            .unwrap();

        let data = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(data.contains("\"ok\": true"));
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
