use config::{Config, File, FileFormat};
use derive_builder::Builder;
use pneuscope_probe::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into, strip_option), default)]
#[serde(default)]
pub struct AssessorConfig {
    /// Semilla fija para la política con ruido; sin ella se usa un generador por hilo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
    /// Porcentaje de CPU a usar en los lotes (0.0–100.0)
    pub batch_cpu_percent: f32,
    pub engine: EngineConfig,
}

impl Default for AssessorConfig {
    fn default() -> Self {
        AssessorConfig {
            rng_seed: None,
            batch_cpu_percent: 50.0,
            engine: EngineConfig::default(),
        }
    }
}

impl AssessorConfig {
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_string_lossy().into_owned();
        let cfg = Config::builder()
            .add_source(File::new(&path, FileFormat::Toml))
            .build()
            .map_err(ConfigError::Parse)?;
        let ac = cfg
            .try_deserialize::<AssessorConfig>()
            .map_err(ConfigError::Parse)?;
        Ok(ac)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
