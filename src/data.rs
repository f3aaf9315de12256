//! Raw run data loading.
//!
//! The fetched-comments and golden files keep the layout the fetch
//! tooling has always produced:
//!
//! - `<repo>.json` — `{ repo, prs: [{ number, title, review_comments:
//!   [{ body, path?, line? }] }] }`
//! - `golden_<name>.json` — `[{ pr_title, comments: [{ severity,
//!   comment }] }]`

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tokio::fs;

use eval_engine::ingest::{CandidateRecord, GoldenRecord};

/// One repo's fetched agent comments.
#[derive(Debug, Deserialize)]
pub struct CandidateFile {
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub prs: Vec<RawPr>,
}

/// One PR's worth of fetched agent comments.
#[derive(Debug, Deserialize)]
pub struct RawPr {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub review_comments: Vec<CandidateRecord>,
}

/// One PR's golden comments.
#[derive(Debug, Deserialize)]
pub struct GoldenPr {
    pub pr_title: String,
    #[serde(default)]
    pub comments: Vec<GoldenRecord>,
}

pub async fn load_candidates(path: &Path) -> anyhow::Result<CandidateFile> {
    let data = fs::read(path)
        .await
        .with_context(|| format!("reading candidate file {}", path.display()))?;
    serde_json::from_slice(&data)
        .with_context(|| format!("parsing candidate file {}", path.display()))
}

pub async fn load_golden(path: &Path) -> anyhow::Result<Vec<GoldenPr>> {
    let data = fs::read(path)
        .await
        .with_context(|| format!("reading golden file {}", path.display()))?;
    serde_json::from_slice(&data)
        .with_context(|| format!("parsing golden file {}", path.display()))
}

/// Golden sets are keyed by PR title; candidates carry numbers and
/// titles. Build the title → comments lookup once per repo.
pub fn golden_by_title(golden: Vec<GoldenPr>) -> HashMap<String, Vec<GoldenRecord>> {
    golden
        .into_iter()
        .map(|g| (g.pr_title, g.comments))
        .collect()
}
