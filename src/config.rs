//! Analysis Settings
//! Fixed run settings with an optional JSON override file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Dataset read when no override is present.
pub const DEFAULT_INPUT: &str = "Unemployment_in_India.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// How charts are shown once rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// One blocking window per chart
    #[default]
    Interactive,
    /// Render off-screen only
    Headless,
}

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    pub display: DisplayMode,
    /// Directory for PNG copies of every chart; nothing is written when unset.
    pub chart_dir: Option<PathBuf>,
    pub chart_width: u32,
    pub chart_height: u32,
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            display: DisplayMode::Interactive,
            chart_dir: None,
            chart_width: 1200,
            chart_height: 600,
            top_n: 5,
        }
    }
}

impl AnalysisConfig {
    /// Override file looked up in the working directory.
    pub const FILE_NAME: &'static str = "unemployment_eda.json";

    /// Load settings from `path`, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No {} found, using default settings", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Parse and validate settings from JSON text. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "chart size must be positive, got {}x{}",
                self.chart_width, self.chart_height
            )));
        }
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".into()));
        }
        Ok(())
    }
}
