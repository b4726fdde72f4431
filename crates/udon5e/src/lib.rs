//! udon5e - dndjp D&D 5e character sheets to Udonarium characters.
//!
//! This crate ties the udon5e library ecosystem into one conversion:
//! a sheet page is scraped into a record, the record becomes a chat palette
//! and an Udonarium XML sheet, and the sheet is packed into a zip archive.
//!
//! # Crates
//!
//! - [`udon5e_common`] - The character record and modifier formatting
//! - [`udon5e_scrape`] - Sheet URLs, fetching, Shift_JIS decoding, scraping
//! - [`udon5e_sheet`] - Udonarium XML sheets
//! - [`udon5e_palette`] - Chat palettes
//! - [`udon5e_pack`] - Zip archives and download filenames
//!
//! # Example
//!
//! ```no_run
//! use udon5e::prelude::*;
//!
//! let page = std::fs::read("sheet.html")?;
//! let options = ConvertOptions {
//!     use_computed_values: true,
//!     roll_command: "default".to_string(),
//! };
//! let conversion = convert_bytes(&page, "shift_jis", &options)?;
//! std::fs::write(conversion.archive_file_name(), &conversion.archive)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod convert;
mod error;

// Re-export all sub-crates
pub use udon5e_common as common;
pub use udon5e_pack as pack;
pub use udon5e_palette as palette;
pub use udon5e_scrape as scrape;
pub use udon5e_sheet as sheet;

pub use convert::{convert, convert_bytes, convert_record, Conversion, ConvertOptions};
pub use error::{Error, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{convert, convert_bytes, convert_record, Conversion, ConvertOptions};
    pub use udon5e_common::{format_modifier, Ability, CharacterRecord, Skill, SpellLevel};
    pub use udon5e_pack::{content_disposition, package_archive, sanitize_filename};
    pub use udon5e_palette::{build_chat_palette, RollTokens};
    pub use udon5e_scrape::{decode_shift_jis, extract_html, SheetFetcher, SheetUrl};
    pub use udon5e_sheet::{build_xml, sheet_document};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
