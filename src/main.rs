//! Batch entrypoint: score agent review comments against golden
//! findings across the benchmark repos and persist the run artifacts.

use std::error::Error;

use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

use llm_judge::LlmJudge;
use report_gen::{RepoEvaluation, RunSummary};

mod config;
mod data;
mod run;

use config::RunConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env when present.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    tracing::subscriber::set_global_default(build_subscriber(filter))
        .expect("setting default subscriber failed");

    let cfg = RunConfig::from_env();
    let judge = LlmJudge::from_env()?;

    let (repos, overall) = run::run_batch(&judge, &cfg).await?;

    print_summary(&cfg, &repos, &overall);
    Ok(())
}

/// Console logging gated by the given env filter (`RUST_LOG` or the
/// `info` fallback built in `main`).
fn build_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
}

fn print_summary(cfg: &RunConfig, repos: &[RepoEvaluation], overall: &RunSummary) {
    let rule = "=".repeat(60);
    let pr_total: usize = repos.iter().map(|r| r.prs.len()).sum();

    println!("\n{rule}");
    println!(
        "{}",
        format!("OVERALL RESULTS ({} repos - {} PRs)", repos.len(), pr_total).bold()
    );
    println!("{rule}");
    println!("Total True Positives:  {}", overall.total_tp);
    println!("Total False Positives: {}", overall.total_fp);
    println!("Total False Negatives: {}", overall.total_fn);
    println!();
    println!("Precision: {}", format!("{:.1}%", overall.precision).green());
    println!("Recall:    {}", format!("{:.1}%", overall.recall).green());
    println!("F-score:   {}", format!("{:.1}%", overall.f_score).green());
    println!(
        "\nResults saved to {}",
        cfg.out_dir.display().to_string().cyan()
    );
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;

    #[test]
    fn env_filter_gates_the_installed_subscriber() {
        let subscriber = build_subscriber(EnvFilter::try_new("warn").unwrap());
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(Level::WARN));
            assert!(!tracing::enabled!(Level::DEBUG));
        });
    }
}
