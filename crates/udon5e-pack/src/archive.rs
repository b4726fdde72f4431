//! Single-entry zip archives.

use std::io::{Cursor, Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::Result;

/// Deflate level used for every entry.
pub const COMPRESSION_LEVEL: i64 = 9;

/// Write a zip holding `contents` as its only entry, named `entry_name`.
///
/// Returns the writer once the central directory has been written.
pub fn write_archive<W: Write + Seek>(writer: W, entry_name: &str, contents: &[u8]) -> Result<W> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL));

    let mut zip = ZipWriter::new(writer);
    zip.start_file(entry_name, options)?;
    zip.write_all(contents)?;
    let writer = zip.finish()?;

    tracing::debug!(entry = entry_name, bytes = contents.len(), "wrote archive");
    Ok(writer)
}

/// Package an XML document as an in-memory zip.
pub fn package_archive(xml: &str, entry_name: &str) -> Result<Vec<u8>> {
    let cursor = write_archive(Cursor::new(Vec::new()), entry_name, xml.as_bytes())?;
    Ok(cursor.into_inner())
}
