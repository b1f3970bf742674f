use std::fs;
use std::path::{Path, PathBuf};

use dirs_next as dirs;
use serde::Deserialize;

use crate::error::AppError;
use crate::project::{DEFAULT_CACHE_DIR, DEFAULT_MARKER, ProjectLayout};

/// Settings read from `config.toml`. The file is optional and never written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub marker: String,
    pub cache_dir: String,
    pub skip: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            marker: DEFAULT_MARKER.to_string(),
            cache_dir: DEFAULT_CACHE_DIR.to_string(),
            skip: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(self.marker.clone(), self.cache_dir.clone())
    }

    /// Configured skip paths with `~` expanded, followed by `extra`.
    pub fn skip_paths(&self, extra: &[PathBuf]) -> Result<Vec<PathBuf>, AppError> {
        let mut paths = Vec::with_capacity(self.skip.len() + extra.len());
        for value in &self.skip {
            paths.push(PathBuf::from(expand_home(value)?));
        }
        paths.extend_from_slice(extra);
        Ok(paths)
    }

    fn validate(&self) -> Result<(), AppError> {
        for (key, value) in [("marker", &self.marker), ("cache_dir", &self.cache_dir)] {
            if !is_single_component(value) {
                return Err(AppError::config(format!(
                    "'{key}' must be a single file name, got '{value}'"
                )));
            }
        }
        Ok(())
    }
}

pub fn config_file_path() -> Result<PathBuf, AppError> {
    let config_root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .ok_or_else(|| {
            AppError::config("Unable to determine configuration directory for this platform")
        })?;
    Ok(config_root.join("modsweep").join("config.toml"))
}

fn is_single_component(value: &str) -> bool {
    let mut components = Path::new(value).components();
    matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    )
}

fn expand_home(value: &str) -> Result<String, AppError> {
    if !value.starts_with('~') {
        return Ok(value.to_string());
    }
    let home_dir = dirs::home_dir().ok_or_else(|| {
        AppError::config("Unable to expand '~' because the home directory is unknown")
    })?;
    if value == "~" {
        Ok(home_dir.display().to_string())
    } else if let Some(stripped) = value.strip_prefix("~/") {
        Ok(home_dir.join(stripped).display().to_string())
    } else {
        Ok(value.to_string())
    }
}
