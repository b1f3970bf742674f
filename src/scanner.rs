use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::model::Candidate;
use crate::path::{SkipSet, is_excluded};
use crate::project::ProjectLayout;

/// Walks root directories and yields project roots.
#[derive(Debug, Clone, Default)]
pub struct TreeScanner {
    layout: ProjectLayout,
}

impl TreeScanner {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Start a scan over `roots`. The returned iterator does the walking
    /// lazily and is exhausted after one pass.
    pub fn scan(&self, roots: &[PathBuf], skip: &SkipSet) -> Candidates {
        Candidates {
            layout: self.layout.clone(),
            skip: skip.clone(),
            roots: roots.to_vec().into_iter(),
            walker: None,
            emitted: HashSet::new(),
        }
    }
}

/// Lazy, pre-order sequence of candidates produced by [`TreeScanner::scan`].
///
/// Roots are visited in the order given; within a root, siblings are visited
/// in file-name order. Excluded directories are pruned with their whole
/// subtree. A project's own cache directory is never entered, but other
/// children of a project are, so nested projects are found too.
pub struct Candidates {
    layout: ProjectLayout,
    skip: SkipSet,
    roots: std::vec::IntoIter<PathBuf>,
    walker: Option<walkdir::IntoIter>,
    emitted: HashSet<PathBuf>,
}

impl Iterator for Candidates {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            let Some(walker) = self.walker.as_mut() else {
                let root = self.roots.next()?;
                debug!("Scanning {}", root.display());
                self.walker =
                    Some(WalkDir::new(root).follow_links(false).sort_by_file_name().into_iter());
                continue;
            };

            let Some(entry) = walker.next() else {
                self.walker = None;
                continue;
            };

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping {:?}: {}", err.path(), err);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            if is_excluded(path, &self.skip) {
                debug!("Pruning skipped directory {}", path.display());
                walker.skip_current_dir();
                continue;
            }

            if entry.depth() > 0 && is_project_cache(&self.layout, path) {
                trace!("Not descending into {}", path.display());
                walker.skip_current_dir();
                continue;
            }

            if self.layout.is_project(path) && self.emitted.insert(path.to_path_buf()) {
                debug!("Found project {}", path.display());
                return Some(Candidate::new(path.to_path_buf()));
            }
        }
    }
}

impl std::fmt::Debug for Candidates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidates")
            .field("layout", &self.layout)
            .field("remaining_roots", &self.roots.len())
            .field("emitted", &self.emitted.len())
            .finish()
    }
}

fn is_project_cache(layout: &ProjectLayout, path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == layout.cache_dir())
        && path.parent().is_some_and(|parent| layout.is_project(parent))
}
