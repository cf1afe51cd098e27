use crate::domain::config::AnalysisConfig;
use crate::domain::types::DeclarationData;
use anyhow::Result;

/// Declaration source port (implemented by Infrastructure)
pub trait DeclarationSource {
    fn load(&self) -> Result<DeclarationData>;

    /// Human-readable origin, used in logs and health output
    fn describe(&self) -> String;
}

/// Analysis configuration port
pub trait ConfigSource {
    fn load_config(&self) -> Result<AnalysisConfig>;
}
