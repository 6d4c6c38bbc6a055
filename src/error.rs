//! Error types shared by the listing, transfer, launch and config layers.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while listing a directory.
#[derive(Error, Debug)]
pub enum ListError {
    /// Permission denied when reading the directory
    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// The directory no longer exists (deleted between selection and listing)
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// The path exists but is not a directory
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Any other I/O failure
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => ListError::PermissionDenied { path },
            io::ErrorKind::NotFound => ListError::NotFound { path },
            _ => ListError::Io { path, source },
        }
    }
}

/// Per-item failure of a copy or move.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("invalid source: {path}")]
    InvalidSource { path: PathBuf },

    #[error("cannot move {path} into itself")]
    IntoItself { path: PathBuf },

    #[error("{action} failed for {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure to hand an entry to the platform launcher.
#[derive(Error, Debug)]
#[error("could not open {path}: {source}")]
pub struct OpenError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Errors raised while reading or writing the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("config I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
