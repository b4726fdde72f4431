//! The conversion pipeline: page → record → palette → XML → archive.

use udon5e_common::CharacterRecord;
use udon5e_pack::{archive_entry_name, content_disposition, package_archive};
use udon5e_palette::build_chat_palette;
use udon5e_scrape::{decode_with_label, extract_html};
use udon5e_sheet::build_xml;

use crate::Result;

/// How the chat palette is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Write sheet numbers instead of `{resource}` references.
    pub use_computed_values: bool,
    /// `"default"` for plain `1d20` rolls; anything else uses `AT`/`AR`.
    pub roll_command: String,
}

/// Everything produced from one sheet page.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub record: CharacterRecord,
    pub chat_palette: String,
    pub xml: String,
    /// Zip archive holding the XML as its only entry.
    pub archive: Vec<u8>,
    pub entry_name: String,
    /// Header value to serve the archive under.
    pub content_disposition: String,
}

impl Conversion {
    /// File name for saving the archive locally.
    ///
    /// Characters most file systems reject become `_`.
    pub fn archive_file_name(&self) -> String {
        let stem: String = self
            .record
            .name
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        format!("{}.zip", stem)
    }
}

/// Convert page markup that is already decoded to UTF-8.
pub fn convert(markup: &str, options: &ConvertOptions) -> Result<Conversion> {
    let record = extract_html(markup);
    convert_record(record, options)
}

/// Decode raw page bytes with an encoding label, then convert.
pub fn convert_bytes(bytes: &[u8], encoding: &str, options: &ConvertOptions) -> Result<Conversion> {
    let markup = decode_with_label(bytes, encoding)?;
    convert(&markup, options)
}

/// Convert an already extracted record.
///
/// The palette is built first because the XML embeds it.
pub fn convert_record(record: CharacterRecord, options: &ConvertOptions) -> Result<Conversion> {
    let chat_palette =
        build_chat_palette(&record, options.use_computed_values, &options.roll_command);
    let xml = build_xml(&record, &chat_palette)?;

    let entry_name = archive_entry_name(&record.name);
    let archive = package_archive(&xml, &entry_name)?;
    let content_disposition = content_disposition(&record.name);

    tracing::info!(
        name = %record.name,
        archive_bytes = archive.len(),
        "converted character sheet"
    );

    Ok(Conversion {
        record,
        chat_palette,
        xml,
        archive,
        entry_name,
        content_disposition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_still_converts() {
        let conversion = convert("<html><body></body></html>", &ConvertOptions::default()).unwrap();

        assert_eq!(conversion.record.name, "");
        assert_eq!(conversion.entry_name, ".xml");
        assert_eq!(
            conversion.content_disposition,
            "attachment; filename*=UTF-8''.zip"
        );
        assert!(conversion.xml.contains(&conversion.chat_palette));
        assert!(!conversion.archive.is_empty());
    }

    #[test]
    fn test_palette_options_flow_through() {
        let page = "<html><head><title>Hero</title></head><body></body></html>";
        let options = ConvertOptions {
            use_computed_values: true,
            roll_command: "default".to_string(),
        };
        let conversion = convert(page, &options).unwrap();

        assert!(conversion.chat_palette.contains("1d20+0 【筋力】能力値判定"));
        assert_eq!(conversion.archive_file_name(), "Hero.zip");
    }

    #[test]
    fn test_archive_file_name_is_path_safe() {
        let page = "<html><head><title>A/B: C?</title></head><body></body></html>";
        let conversion = convert(page, &ConvertOptions::default()).unwrap();
        assert_eq!(conversion.archive_file_name(), "A_B_ C_.zip");
        assert_eq!(conversion.entry_name, "A/B: C?.xml");
    }

    #[test]
    fn test_unknown_encoding() {
        let result = convert_bytes(b"<html></html>", "klingon", &ConvertOptions::default());
        assert!(matches!(
            result,
            Err(crate::Error::Scrape(udon5e_scrape::Error::UnknownEncoding(_)))
        ));
    }
}
