//! Environment-driven run configuration.
//!
//! Variables:
//! - `BENCH_DATA_DIR`  — directory with raw comment files, default
//!   `results/raw_comments`; expects `<repo>.json` and
//!   `golden_<name>.json` pairs (with `name` = repo minus the
//!   `droid-` prefix).
//! - `BENCH_OUT_DIR`   — run output directory, default
//!   `results/run_<today>`.
//! - `BENCH_REPOS`     — comma-separated repo list, default the five
//!   benchmark repos.
//! - `BENCH_BASELINE`  — optional path to a prior run's
//!   `overall_summary.json` to compare against in `RESULTS.md`.

use std::path::PathBuf;

/// Benchmark repos evaluated when `BENCH_REPOS` is unset.
const DEFAULT_REPOS: &[&str] = &[
    "droid-sentry",
    "droid-grafana",
    "droid-keycloak",
    "droid-discourse",
    "droid-cal_dot_com",
];

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub repos: Vec<String>,
    pub baseline: Option<PathBuf>,
}

impl RunConfig {
    pub fn from_env() -> Self {
        let data_dir = std::env::var("BENCH_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("results/raw_comments"));

        let out_dir = std::env::var("BENCH_OUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                PathBuf::from(format!("results/run_{}", chrono_date()))
            });

        let repos = std::env::var("BENCH_REPOS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| DEFAULT_REPOS.iter().map(|s| s.to_string()).collect());

        let baseline = std::env::var("BENCH_BASELINE").ok().map(PathBuf::from);

        Self {
            data_dir,
            out_dir,
            repos,
            baseline,
        }
    }

    /// Run name used in the report header (the out dir's last segment).
    pub fn run_name(&self) -> String {
        self.out_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "run".to_string())
    }

    /// `droid-sentry` → golden file name `golden_sentry.json`.
    pub fn golden_path(&self, repo: &str) -> PathBuf {
        let name = repo.strip_prefix("droid-").unwrap_or(repo);
        self.data_dir.join(format!("golden_{name}.json"))
    }

    pub fn candidates_path(&self, repo: &str) -> PathBuf {
        self.data_dir.join(format!("{repo}.json"))
    }
}

fn chrono_date() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
