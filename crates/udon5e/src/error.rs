//! Error type for the whole conversion.

use thiserror::Error;

/// Any error from one of the conversion stages.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] udon5e_common::Error),

    /// Fetching or decoding the page failed.
    #[error(transparent)]
    Scrape(#[from] udon5e_scrape::Error),

    /// Writing the XML sheet failed.
    #[error(transparent)]
    Sheet(#[from] udon5e_sheet::Error),

    /// Writing the archive failed.
    #[error(transparent)]
    Pack(#[from] udon5e_pack::Error),
}

/// Result type for conversions.
pub type Result<T> = std::result::Result<T, Error>;
