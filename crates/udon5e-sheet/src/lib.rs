//! Udonarium character sheets.
//!
//! Turns a [`CharacterRecord`](udon5e_common::CharacterRecord) into the XML
//! document Udonarium imports as a character piece. The document is built as
//! an [`XmlNode`] tree by [`sheet_document`] and serialized with `quick-xml`.
//!
//! # Example
//!
//! ```
//! use udon5e_common::CharacterRecord;
//! use udon5e_sheet::build_xml;
//!
//! let record = CharacterRecord {
//!     name: "Test Hero".to_string(),
//!     ..CharacterRecord::default()
//! };
//! let xml = build_xml(&record, "1d20 イニシアチブ").unwrap();
//! assert!(xml.contains("<data name=\"name\">Test Hero</data>"));
//! ```

mod error;
mod node;
mod sheet;

pub use error::{Error, Result};
pub use node::XmlNode;
pub use sheet::{build_xml, modifier_name, save_name, sheet_document, spell_group_name, DICEBOT};
