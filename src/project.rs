use std::path::{Path, PathBuf};

pub const DEFAULT_MARKER: &str = "package.json";
pub const DEFAULT_CACHE_DIR: &str = "node_modules";

/// Names that identify a project root and the cache directory inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    marker: String,
    cache_dir: String,
}

impl ProjectLayout {
    pub fn new<M: Into<String>, C: Into<String>>(marker: M, cache_dir: C) -> Self {
        Self { marker: marker.into(), cache_dir: cache_dir.into() }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn cache_dir(&self) -> &str {
        &self.cache_dir
    }

    /// True iff the marker file sits directly inside `directory`.
    pub fn is_project(&self, directory: &Path) -> bool {
        directory.join(&self.marker).is_file()
    }

    pub fn cache_path(&self, project: &Path) -> PathBuf {
        project.join(&self.cache_dir)
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        ProjectLayout::new(DEFAULT_MARKER, DEFAULT_CACHE_DIR)
    }
}
