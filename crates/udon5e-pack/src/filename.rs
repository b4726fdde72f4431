//! Names for the archive and its entry.

/// Make a character name safe for a `Content-Disposition` header.
///
/// ASCII control characters and `"`, `;`, `\`, `/` become `_`; the result is
/// then percent-encoded as UTF-8.
pub fn sanitize_filename(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| match c {
            '\u{0}'..='\u{1f}' | '\u{7f}' | '"' | ';' | '\\' | '/' => '_',
            c => c,
        })
        .collect();

    urlencoding::encode(&cleaned).into_owned()
}

/// `Content-Disposition` value for downloading a character's archive.
pub fn content_disposition(raw_name: &str) -> String {
    format!("attachment; filename*=UTF-8''{}.zip", sanitize_filename(raw_name))
}

/// Name of the XML entry inside the archive.
pub fn archive_entry_name(raw_name: &str) -> String {
    format!("{}.xml", raw_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_are_replaced() {
        let clean = sanitize_filename("a/b\\c\"d;e");
        for c in ['/', '\\', '"', ';'] {
            assert!(!clean.contains(c));
        }
        assert_eq!(urlencoding::decode(&clean).unwrap(), "a_b_c_d_e");
    }

    #[test]
    fn test_control_characters_are_replaced() {
        assert_eq!(sanitize_filename("a\tb\nc\u{7f}"), "a_b_c_");
    }

    #[test]
    fn test_percent_encoding() {
        assert_eq!(sanitize_filename("Test Hero"), "Test%20Hero");
        assert_eq!(sanitize_filename("勇者"), "%E5%8B%87%E8%80%85");
        assert_eq!(sanitize_filename("a-b_c.d~e"), "a-b_c.d~e");
    }

    #[test]
    fn test_header_and_entry_names() {
        assert_eq!(
            content_disposition("Test Hero"),
            "attachment; filename*=UTF-8''Test%20Hero.zip"
        );
        assert_eq!(content_disposition(""), "attachment; filename*=UTF-8''.zip");
        assert_eq!(archive_entry_name("Test Hero"), "Test Hero.xml");
    }
}
