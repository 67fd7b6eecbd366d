//! Error types for file handle operations.

use std::io;
use std::path::{Path, PathBuf};

/// Every failure a [`FileHandle`](crate::FileHandle) operation can report.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("File is not open for reading: {}", path.display())]
    NotOpen { path: PathBuf },

    #[error("Permission denied for {}: {source}", path.display())]
    Permission { path: PathBuf, source: io::Error },

    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Could not decode {} as UTF-8 text: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A value could not be represented in the target format.
    #[error("Type error: {message}")]
    Type { message: String },

    #[error("Unsupported hash algorithm: {name}")]
    UnsupportedAlgorithm { name: String },
}

impl Error {
    /// Classify an `io::Error` raised while touching `path`.
    pub fn io(path: impl AsRef<Path>, error: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match error.kind() {
            io::ErrorKind::NotFound => Error::NotFound { path },
            io::ErrorKind::PermissionDenied => Error::Permission {
                path,
                source: error,
            },
            io::ErrorKind::InvalidData => Error::Decode {
                path,
                message: error.to_string(),
            },
            _ => Error::Io {
                path,
                source: error,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
