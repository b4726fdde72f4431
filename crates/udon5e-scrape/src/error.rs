//! Error types for fetching and reading sheet pages.

use thiserror::Error;

/// Errors that can occur before a page reaches the extractor.
///
/// Extraction itself cannot fail; missing cells read as empty strings.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] udon5e_common::Error),

    /// The URL is not a character sheet URL.
    #[error("invalid sheet URL: {0:?}")]
    InvalidUrl(String),

    /// The page could not be downloaded.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Unknown text encoding label.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
}

/// Result type for scraping operations.
pub type Result<T> = std::result::Result<T, Error>;
