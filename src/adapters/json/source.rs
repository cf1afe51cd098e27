use crate::domain::ports::DeclarationSource;
use crate::domain::types::DeclarationData;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// Declaration source adapter backed by a JSON export
pub struct JsonDeclarationSource {
    pub path: PathBuf,
}

impl JsonDeclarationSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DeclarationSource for JsonDeclarationSource {
    fn load(&self) -> Result<DeclarationData> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open declaration file: {}", self.path.display()))?;
        let data: DeclarationData = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse declaration file: {}", self.path.display()))?;
        info!(
            path = %self.path.display(),
            types = data.types.len(),
            "loaded declarations"
        );
        Ok(data)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
