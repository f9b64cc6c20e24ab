use std::{collections::HashMap, path::Path};

use config::{Config, Environment, File, FileFormat};
use pneuscope_core::{AssessorConfig, ConfigError};
use serde::{Deserialize, Serialize};

/// Prefijo de las variables de entorno (`PNEUSCOPE_PORT`, `PNEUSCOPE_ASSESSOR__RNG_SEED`...)
pub const ENV_PREFIX: &str = "PNEUSCOPE";
/// Variable heredada del despliegue original; si está presente manda sobre el resto.
pub const LEGACY_PORT_VAR: &str = "PORT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
    pub assessor: AssessorConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            max_body_bytes: 8 * 1024 * 1024,
            assessor: AssessorConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Defaults → fichero TOML (opcional) → entorno del proceso.
    pub fn load(settings_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(settings_file, None)
    }

    /// Como [`ServiceConfig::load`], pero con un entorno explícito en lugar del del proceso.
    pub fn load_with(
        settings_file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let legacy_port = match &env {
            Some(vars) => vars.get(LEGACY_PORT_VAR).cloned(),
            None => std::env::var(LEGACY_PORT_VAR).ok(),
        };

        let mut builder = Config::builder();

        if let Some(path) = settings_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let cfg = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins")
                    .try_parsing(true)
                    .source(env),
            )
            .set_override_option("port", legacy_port)?
            .build()?;

        Ok(cfg.try_deserialize::<ServiceConfig>()?)
    }

    /// Escribe la configuración como TOML (usado para poblar el fichero en el primer arranque).
    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
