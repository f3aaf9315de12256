//! Deterministic core of the review-agent evaluation harness.
//!
//! Pipeline position: normalized findings come in from ingestion, one
//! pull request at a time, together with the hand-curated golden set
//! for that PR. This crate decides which candidate findings correspond
//! to which golden findings and turns the correspondence into
//! precision/recall/F-score.
//!
//! 1) **Ingestion filter** — drop malformed and placeholder records so
//!    the matcher only ever sees real findings.
//! 2) **PR matcher** — per candidate, consult the [`MatchJudge`]
//!    adapter; resolve its free-text claim back to a concrete golden
//!    finding; first claim per golden identity wins, later claims are
//!    duplicates.
//! 3) **Metrics** — fold per-PR counts into an explicit accumulator
//!    owned by the caller; duplicates never inflate true positives.
//!
//! The semantic judgment itself lives behind the [`MatchJudge`] trait,
//! so everything here is fully deterministic given the judge's outputs
//! and unit-testable with a scripted fake. No `async-trait`, no heap
//! trait objects: the trait uses a plain `impl Future` return.

pub mod finding;
pub mod ingest;
pub mod judge;
pub mod matcher;
pub mod metrics;

pub use finding::{Finding, Location, Origin, Severity};
pub use judge::{MatchConfidence, MatchJudge, MatchVerdict};
pub use matcher::{Judged, PrOutcome, classify, resolve_golden};
pub use metrics::{Counts, Metrics, RunTotals};
