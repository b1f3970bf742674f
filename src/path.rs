use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dirs_next as dirs;
use same_file::Handle;
use tracing::debug;

/// Replace the home directory prefix with `~` to make output easier to read.
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        let mut display = PathBuf::from("~");
        display.push(stripped);
        return display.display().to_string();
    }

    path.display().to_string()
}

/// Make `path` absolute relative to the current directory and drop trailing
/// separators and `.` components. Does not touch the filesystem.
pub fn absolutize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    absolute.components().collect()
}

/// Canonical absolute form of `path`, with symlinks followed.
pub fn resolve(path: &Path) -> std::io::Result<PathBuf> {
    fs::canonicalize(absolutize(path))
}

/// Canonicalize and deduplicate root paths, preserving the order they were
/// given. Roots that do not resolve are kept in absolute form so the scanner
/// can report them.
pub fn resolve_roots(explicit: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut roots = Vec::with_capacity(explicit.len());
    for root in explicit {
        let resolved = resolve(root).unwrap_or_else(|_| absolutize(root));
        if seen.insert(resolved.clone()) {
            roots.push(resolved);
        }
    }
    roots
}

pub fn resolve_roots_with_current(explicit: &[PathBuf], current: bool) -> Vec<PathBuf> {
    if current || explicit.is_empty() {
        vec![std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))]
    } else {
        explicit.to_vec()
    }
}

/// Set of directories pruned from every scan.
///
/// Each skip path is held open as a [`Handle`], so membership is decided by
/// filesystem identity (device and inode on Unix) rather than by path text.
/// A skip path that cannot be opened matches nothing.
#[derive(Debug, Clone, Default)]
pub struct SkipSet {
    handles: Arc<HashSet<Handle>>,
}

impl SkipSet {
    pub fn resolve(paths: &[PathBuf]) -> Self {
        let mut handles = HashSet::new();
        for path in paths {
            match Handle::from_path(absolutize(path)) {
                Ok(handle) => {
                    handles.insert(handle);
                }
                Err(err) => {
                    debug!("Skip path {} matches nothing: {}", path.display(), err);
                }
            }
        }
        Self { handles: Arc::new(handles) }
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// True iff `candidate` is the same filesystem entry as a member of `skip`.
pub fn is_excluded(candidate: &Path, skip: &SkipSet) -> bool {
    if skip.is_empty() {
        return false;
    }
    match Handle::from_path(candidate) {
        Ok(handle) => skip.handles.contains(&handle),
        Err(_) => false,
    }
}
