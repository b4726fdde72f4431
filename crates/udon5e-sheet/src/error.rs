//! Error types for sheet serialization.

use thiserror::Error;

/// Errors that can occur while writing a sheet.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] udon5e_common::Error),

    /// XML writer error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type for sheet operations.
pub type Result<T> = std::result::Result<T, Error>;
