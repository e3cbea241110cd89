//! Quiz configuration loading.
//!
//! Search order: an explicit path if given, then `cuizz.toml` in the
//! current directory, then `~/.config/cuizz/config.toml`, else defaults.
//! CLI flags override whatever was loaded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level cuizz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Whether q/s/r control commands are recognized during the quiz.
    #[serde(default = "default_controls")]
    pub controls: bool,
    /// Consecutive input-read failures tolerated before the session ends.
    #[serde(default = "default_max_input_retries")]
    pub max_input_retries: u32,
}

fn default_controls() -> bool {
    true
}

fn default_max_input_retries() -> u32 {
    3
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            controls: default_controls(),
            max_input_retries: default_max_input_retries(),
        }
    }
}

/// Load configuration from the well-known paths.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("cuizz.toml");
        if local.exists() {
            Some(local)
        } else {
            config_home().map(|dir| dir.join("config.toml")).filter(|p| p.exists())
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(QuizConfig::default()),
    }
}

fn config_home() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("cuizz"))
}
