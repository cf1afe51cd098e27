use crate::domain::config::AnalysisConfig;
use crate::domain::ports::ConfigSource;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Configuration adapter: an optional JSON file, defaults when absent
pub struct JsonConfigSource {
    pub path: Option<PathBuf>,
}

impl JsonConfigSource {
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }
}

impl ConfigSource for JsonConfigSource {
    fn load_config(&self) -> Result<AnalysisConfig> {
        match &self.path {
            Some(path) => load_config(path),
            None => Ok(AnalysisConfig::default()),
        }
    }
}

/// Load an [`AnalysisConfig`] from a JSON file. Missing keys keep their defaults.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: AnalysisConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    info!(path = %path.display(), "loaded analysis config");
    Ok(config)
}
