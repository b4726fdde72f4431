//! Error types for packaging.

use thiserror::Error;

/// Errors that can occur while writing an archive.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] udon5e_common::Error),

    /// Zip writer error.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Common(e.into())
    }
}

/// Result type for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;
