use std::{
    env,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;

use crate::{errors::Error, fs_utils};

/// Nombre de la ENV var para override de ruta base (despliegues en contenedor)
pub const ENV_BASE_DIR: &str = "PNEUSCOPE_BASE_DIR";

/// Nombre del fichero de ajustes del servicio
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Rutas que usa el servicio
#[derive(Debug, Clone)]
pub struct PneuscopePaths {
    pub config_dir: PathBuf,
    pub settings_file: PathBuf,
}

impl PneuscopePaths {
    pub fn new() -> Result<Self, Error> {
        let config_dir = if let Ok(base) = env::var(ENV_BASE_DIR) {
            PathBuf::from(base).join("config")
        } else {
            let proj = ProjectDirs::from("com", "PneuScope", "PneuScope").ok_or(Error::NoHome)?;
            proj.config_dir().to_path_buf()
        };

        Self::from_config_dir(config_dir)
    }

    /// Igual que [`PneuscopePaths::new`] pero con una ruta base explícita.
    pub fn with_base(base: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_config_dir(base.as_ref().join("config"))
    }

    fn from_config_dir(config_dir: PathBuf) -> Result<Self, Error> {
        let paths = PneuscopePaths {
            settings_file: config_dir.join(SETTINGS_FILE_NAME),
            config_dir,
        };

        paths.ensure_structure()?;
        paths.validate_structure()?;

        Ok(paths)
    }

    /// Devuelve true si el fichero de ajustes está vacío (primer arranque).
    pub fn needs_defaults(&self) -> Result<bool, Error> {
        Ok(fs_utils::file_len(&self.settings_file)? == 0)
    }

    /// Se asegura de que la carpeta de configuración y el fichero de ajustes existen.
    pub fn ensure_structure(&self) -> Result<(), Error> {
        fs_utils::ensure_dir(&self.config_dir)?;
        fs_utils::ensure_file(&self.settings_file)?;
        Ok(())
    }

    /// Valida que la carpeta existe Y es escribible. Si falta, la intenta crear.
    pub fn validate_structure(&self) -> Result<(), Error> {
        if !self.config_dir.exists() {
            fs_utils::ensure_dir(&self.config_dir)?;
        }
        fs_utils::check_writable(&self.config_dir)?;
        Ok(())
    }
}
