use std::io;

/// Errores genéricos del crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No se pudo determinar el directorio base (HOME, XDG, etc)
    #[error(
        "Could not determine the project directory, the call to ProjectDirs failed, \
         the system probably does not provide a valid $HOME path."
    )]
    NoHome,

    /// La ruta existe pero no es un fichero regular (p.ej. un directorio)
    #[error("Expected a regular file at {0}")]
    NotAFile(std::path::PathBuf),

    /// Error de IO al crear dirs, ficheros...
    #[error(transparent)]
    Io(#[from] io::Error),
}
