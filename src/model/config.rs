use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::theme::ThemeChoice;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the board's store directory lives (default: platform data dir)
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
    /// Theme used when the store holds no theme preference yet
    #[serde(default)]
    pub default_theme: ThemeChoice,
}
