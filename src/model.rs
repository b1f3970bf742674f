use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::path::{SkipSet, resolve_roots};

/// Inputs for a single scan-and-clean invocation.
///
/// Roots are absolute, canonical where possible, and deduplicated in the
/// order they were supplied. Skip paths are resolved once, up front.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    roots: Vec<PathBuf>,
    skip: SkipSet,
}

impl ScanRequest {
    pub fn new(roots: &[PathBuf], skip: &[PathBuf]) -> Self {
        Self { roots: resolve_roots(roots), skip: SkipSet::resolve(skip) }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn skip(&self) -> &SkipSet {
        &self.skip
    }
}

/// A project root discovered during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Candidate(PathBuf);

impl Candidate {
    pub(crate) fn new(path: PathBuf) -> Self {
        Candidate(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

/// Outcome of cleaning one candidate.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResult {
    pub path: PathBuf,
    pub freed_bytes: u64,
    pub removed: bool,
    pub error: Option<String>,
}

impl CleanupResult {
    pub fn removed(path: PathBuf, freed_bytes: u64) -> Self {
        CleanupResult { path, freed_bytes, removed: true, error: None }
    }

    pub fn absent(path: PathBuf) -> Self {
        CleanupResult { path, freed_bytes: 0, removed: false, error: None }
    }

    pub fn failed(path: PathBuf, error: String) -> Self {
        CleanupResult { path, freed_bytes: 0, removed: false, error: Some(error) }
    }
}

/// Totals for a completed run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub total_freed_bytes: u64,
    pub errors: Vec<String>,
    pub items_processed: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<CleanupResult>,
}

impl RunSummary {
    pub fn record(&mut self, result: CleanupResult) {
        self.items_processed += 1;
        if result.removed {
            self.total_freed_bytes = self.total_freed_bytes.saturating_add(result.freed_bytes);
        }
        if let Some(error) = &result.error {
            self.errors.push(error.clone());
        }
        self.results.push(result);
    }

    pub fn removed_count(&self) -> usize {
        self.results.iter().filter(|result| result.removed).count()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Progress event emitted once per processed candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// A candidate whose cache directory exists, measured but not yet removed.
#[derive(Debug, Clone, Serialize)]
pub struct PlanItem {
    pub project: PathBuf,
    pub cache: PathBuf,
    pub size: u64,
}

/// Dry-run view of what a run would remove.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanPlan {
    pub candidates: usize,
    pub items: Vec<PlanItem>,
}

impl ScanPlan {
    pub fn total_size(&self) -> u64 {
        self.items.iter().map(|item| item.size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
