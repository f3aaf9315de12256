//! Persisted artifacts for evaluation runs.
//!
//! Consumes the core's in-memory results and produces what humans and
//! follow-up tooling read afterwards:
//! - per-repo evaluation JSON (`<repo>_eval.json`)
//! - run-wide summary JSON (`overall_summary.json`)
//! - `RESULTS.md` with summary and per-PR breakdown tables, optionally
//!   compared against a baseline run.

pub mod errors;
pub mod markdown;
pub mod store;
pub mod summary;

pub use errors::{ReportError, Result};
pub use summary::{MetricsBlock, PrEvaluation, RepoEvaluation, RunSummary};
