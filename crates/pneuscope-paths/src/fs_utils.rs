use std::{fs, io, path::Path};

use tracing::{Level, instrument};

use crate::errors::Error;

/// Asegura que la carpeta `path` existe (creándola recursivamente si hace falta).
#[instrument(level = Level::TRACE, err)]
pub fn ensure_dir(path: &Path) -> Result<(), Error> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Asegura que el fichero `path` existe (creando su carpeta padre si hace falta).
#[instrument(level = Level::TRACE, err)]
pub fn ensure_file(path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    if !path.exists() {
        fs::File::create(path)?;
    } else if !path.is_file() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }

    Ok(())
}

/// Tamaño en bytes del fichero; 0 si no existe.
pub fn file_len(path: &Path) -> Result<u64, Error> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Verifica que `path` es escribible (tiene permisos adecuados).
#[instrument(level = Level::TRACE, err)]
pub fn check_writable(path: &Path) -> Result<(), Error> {
    let meta = fs::metadata(path)?;
    // en Unix basta con que el owner tenga permisos de escritura:
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = meta.permissions().mode();
        if mode & 0o200 == 0 {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("No write permission for {}", path.display()),
            )
            .into());
        }
    }
    #[cfg(windows)]
    {
        if meta.permissions().readonly() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("No write permission for {}", path.display()),
            )
            .into());
        }
    }
    Ok(())
}
