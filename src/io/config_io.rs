use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::model::config::AppConfig;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "taskdeck")
}

/// Path to config.toml in the platform config directory.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the app configuration. A missing or malformed file falls back
/// to defaults; configuration is never a reason to refuse to start.
pub fn load_config() -> AppConfig {
    config_path()
        .and_then(|path| read_config(&path))
        .unwrap_or_default()
}

fn read_config(path: &Path) -> Option<AppConfig> {
    let raw = fs::read_to_string(path).ok()?;
    toml::from_str(&raw).ok()
}

/// Default store directory inside the platform data dir, with a
/// dot-directory fallback for platforms without one.
pub fn default_store_dir() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join("store"),
        None => PathBuf::from(".taskdeck"),
    }
}

/// Resolve the effective store directory: CLI flag > config > platform default.
pub fn resolve_store_dir(flag: Option<&Path>, config: &AppConfig) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Some(dir) = &config.store_dir {
        return dir.clone();
    }
    default_store_dir()
}
