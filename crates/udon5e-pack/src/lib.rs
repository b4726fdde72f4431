//! Packaging for Udonarium imports.
//!
//! Udonarium imports characters as zip archives holding one XML document per
//! piece. This crate writes those archives and builds the filenames they are
//! served under.

mod archive;
mod error;
mod filename;

pub use archive::{package_archive, write_archive, COMPRESSION_LEVEL};
pub use error::{Error, Result};
pub use filename::{archive_entry_name, content_disposition, sanitize_filename};
