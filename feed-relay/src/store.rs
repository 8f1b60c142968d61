use crate::types::{RelayError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Result of reading a persisted JSON artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Present(T),
    Missing,
    Corrupt(String),
}

impl<T: Default> Loaded<T> {
    /// Best-effort value: missing and corrupt files both yield the default.
    pub fn or_default(self, path: &Path) -> T {
        match self {
            Loaded::Present(value) => value,
            Loaded::Missing => {
                debug!("{} not found, starting from default", path.display());
                T::default()
            }
            Loaded::Corrupt(reason) => {
                warn!("{} is not valid JSON ({}), starting from default", path.display(), reason);
                T::default()
            }
        }
    }

    /// Like [`Loaded::or_default`], but a corrupt file is an error.
    pub fn require_valid(self, path: &Path) -> Result<T> {
        match self {
            Loaded::Corrupt(reason) => Err(RelayError::CorruptState {
                path: PathBuf::from(path),
                reason,
            }),
            other => Ok(other.or_default(path)),
        }
    }
}

/// Read and decode `path`. Only I/O failures other than "not found" are errors.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Loaded<T>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Loaded::Missing),
        Err(e) => return Err(RelayError::Io(e)),
    };

    match serde_json::from_slice(&data) {
        Ok(value) => Ok(Loaded::Present(value)),
        Err(e) => Ok(Loaded::Corrupt(e.to_string())),
    }
}

/// Pretty-print `value` (two-space indent, trailing newline) and write it atomically.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut payload = serde_json::to_vec_pretty(value)?;
    payload.push(b'\n');
    write_atomic(path, &payload)
}

/// Write through a temporary file in the destination directory, then rename it into place.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut file = NamedTempFile::new_in(&dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| RelayError::Io(e.error))?;

    debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
