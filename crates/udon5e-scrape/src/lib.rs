//! Character sheet scraping for udon5e.
//!
//! The dndjp character builder publishes each sheet as a Shift_JIS HTML page
//! with a fixed table layout. This crate downloads and decodes those pages and
//! reads them into a [`CharacterRecord`](udon5e_common::CharacterRecord).
//!
//! # Example
//!
//! ```no_run
//! use udon5e_scrape::{extract_html, SheetFetcher, SheetUrl};
//!
//! # async fn run() -> udon5e_scrape::Result<()> {
//! let url = SheetUrl::parse("https://dndjp.sakura.ne.jp/OUTPUT.php?ID=1")?;
//! let page = SheetFetcher::new()?.fetch(&url).await?;
//! let record = extract_html(&page);
//! println!("{} ({})", record.name, record.classes);
//! # Ok(())
//! # }
//! ```

mod error;
mod extract;
pub mod layout;
mod source;

pub use error::{Error, Result};
pub use extract::{extract, extract_html, Sheet};
pub use source::{decode_shift_jis, decode_with_label, SheetFetcher, SheetUrl, SHEET_URL_PREFIX};

/// Re-export of the HTML parser's document type.
pub use scraper::Html;
