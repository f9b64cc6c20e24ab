//! Crate `pneuscope_paths`: rutas de configuración del servicio

mod errors;
mod fs_utils;
mod paths;

pub use errors::Error;
pub use paths::{ENV_BASE_DIR, PneuscopePaths, SETTINGS_FILE_NAME};
