use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Invalid JSON in {path}: {source}")]
    MalformedJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid schema syntax in {path}: {message}")]
    InvalidSchema { path: PathBuf, message: String },
}

impl Error {
    /// Classify an I/O failure on `path`, keeping "missing" apart from the rest.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Error::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
