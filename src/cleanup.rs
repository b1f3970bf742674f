use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::model::{
    Candidate, CleanupResult, PlanItem, Progress, RunSummary, ScanPlan, ScanRequest,
};
use crate::path::display_path;
use crate::project::ProjectLayout;
use crate::scanner::TreeScanner;
use crate::size::directory_size;

/// Deletes a directory tree. Implemented by the real filesystem and by test
/// doubles that simulate failures.
pub trait Remover {
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover;

impl Remover for FsRemover {
    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}

/// Measures and removes the cache directory of each candidate.
#[derive(Debug, Clone)]
pub struct CleanupExecutor<R = FsRemover> {
    layout: ProjectLayout,
    remover: R,
    cancel: Option<Arc<AtomicBool>>,
}

impl CleanupExecutor<FsRemover> {
    pub fn new(layout: ProjectLayout) -> Self {
        Self::with_remover(layout, FsRemover)
    }
}

impl<R: Remover> CleanupExecutor<R> {
    pub fn with_remover(layout: ProjectLayout, remover: R) -> Self {
        Self { layout, remover, cancel: None }
    }

    /// Stop before the next candidate once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Clean every candidate in order. Failures are recorded on the summary
    /// and never stop the run. `progress` fires once per processed candidate.
    pub fn execute<F>(&self, candidates: &[Candidate], mut progress: F) -> RunSummary
    where
        F: FnMut(Progress),
    {
        let total = candidates.len();
        let mut summary = RunSummary::default();

        for (index, candidate) in candidates.iter().enumerate() {
            if self.is_cancelled() {
                info!("Cancelled with {} project(s) left", total - index);
                break;
            }

            summary.record(self.clean_one(candidate));
            progress(Progress { completed: index + 1, total });
        }

        summary
    }

    fn clean_one(&self, candidate: &Candidate) -> CleanupResult {
        let project = candidate.path().to_path_buf();
        let cache = self.layout.cache_path(&project);

        match fs::symlink_metadata(&cache) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => {
                debug!("{} is not a directory, leaving it alone", cache.display());
                return CleanupResult::absent(project);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return CleanupResult::absent(project);
            }
            Err(err) => {
                let message = format!("Failed to inspect {}: {}", display_path(&cache), err);
                warn!("{message}");
                return CleanupResult::failed(project, message);
            }
        }

        // Size has to be taken before the tree is gone.
        let size = directory_size(&cache);
        match self.remover.remove_dir_all(&cache) {
            Ok(()) => {
                debug!("Removed {} ({} bytes)", cache.display(), size);
                CleanupResult::removed(project, size)
            }
            Err(err) => {
                let message = format!("Failed to remove {}: {}", display_path(&cache), err);
                warn!("{message}");
                CleanupResult::failed(project, message)
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Runs a scan and then cleans everything it found.
#[derive(Debug, Clone)]
pub struct CleanupOrchestrator<R = FsRemover> {
    scanner: TreeScanner,
    executor: CleanupExecutor<R>,
}

impl CleanupOrchestrator<FsRemover> {
    pub fn new(layout: ProjectLayout) -> Self {
        Self::with_executor(CleanupExecutor::new(layout))
    }
}

impl<R: Remover> CleanupOrchestrator<R> {
    pub fn with_executor(executor: CleanupExecutor<R>) -> Self {
        Self { scanner: TreeScanner::new(executor.layout.clone()), executor }
    }

    /// Collect the full candidate list for `request`.
    pub fn candidates(&self, request: &ScanRequest) -> Vec<Candidate> {
        self.scanner.scan(request.roots(), request.skip()).collect()
    }

    /// Measure what a run would remove without deleting anything.
    pub fn plan(&self, request: &ScanRequest) -> ScanPlan {
        self.plan_for(&self.candidates(request))
    }

    /// Measure the cache directory of each already-collected candidate.
    pub fn plan_for(&self, candidates: &[Candidate]) -> ScanPlan {
        let layout = self.scanner.layout();
        let items = candidates
            .iter()
            .filter_map(|candidate| {
                let cache = layout.cache_path(candidate.path());
                let is_dir = fs::symlink_metadata(&cache).map(|m| m.is_dir()).unwrap_or(false);
                is_dir.then(|| PlanItem {
                    project: candidate.path().to_path_buf(),
                    size: directory_size(&cache),
                    cache,
                })
            })
            .collect();
        ScanPlan { candidates: candidates.len(), items }
    }

    /// Scan, then clean. The candidate list is materialized first so progress
    /// carries an accurate total.
    pub fn run<F>(&self, request: &ScanRequest, progress: F) -> RunSummary
    where
        F: FnMut(Progress),
    {
        let candidates = self.candidates(request);
        info!("Found {} project(s)", candidates.len());
        self.execute(&candidates, progress)
    }

    /// Clean a candidate list collected earlier, e.g. the one a confirmation
    /// prompt was built from.
    pub fn execute<F>(&self, candidates: &[Candidate], progress: F) -> RunSummary
    where
        F: FnMut(Progress),
    {
        self.executor.execute(candidates, progress)
    }
}
