//! JSON persistence helpers for the platform config/data directories.

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("could not determine a home directory")]
    NoHomeDir,
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn project_dirs() -> Result<ProjectDirs, PersistenceError> {
    ProjectDirs::from("", "", "arcade_snake").ok_or(PersistenceError::NoHomeDir)
}

fn ensure_dir(dir: &Path) -> Result<(), PersistenceError> {
    fs::create_dir_all(dir).map_err(|source| PersistenceError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Platform data directory (high score, log file), created if needed.
pub fn data_dir() -> Result<PathBuf, PersistenceError> {
    let dir = project_dirs()?.data_dir().to_path_buf();
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Full path for a file in the data directory.
pub fn data_file_path(filename: &str) -> Result<PathBuf, PersistenceError> {
    Ok(data_dir()?.join(filename))
}

/// Full path for a file in the platform config directory. The directory is
/// not created; a missing config is not an error.
pub fn config_file_path(filename: &str) -> Result<PathBuf, PersistenceError> {
    Ok(project_dirs()?.config_dir().join(filename))
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistenceError> {
    let json = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(data).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}
