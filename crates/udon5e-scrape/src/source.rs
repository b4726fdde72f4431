//! Where sheet pages come from: URL validation, fetching, and decoding.
//!
//! The sheet site serves Shift_JIS; everything downstream expects UTF-8.

use std::fmt;
use std::time::Duration;

use encoding_rs::{Encoding, SHIFT_JIS};

use crate::{Error, Result};

/// Every sheet lives under this prefix, followed by a numeric id.
pub const SHEET_URL_PREFIX: &str = "https://dndjp.sakura.ne.jp/OUTPUT.php?ID=";

/// A validated character sheet URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetUrl {
    url: String,
}

impl SheetUrl {
    /// Accept exactly `https://dndjp.sakura.ne.jp/OUTPUT.php?ID=<digits>`.
    pub fn parse(url: &str) -> Result<Self> {
        let id = url
            .strip_prefix(SHEET_URL_PREFIX)
            .ok_or_else(|| Error::InvalidUrl(url.to_string()))?;

        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidUrl(url.to_string()));
        }

        Ok(Self {
            url: url.to_string(),
        })
    }

    /// The sheet id.
    pub fn id(&self) -> &str {
        &self.url[SHEET_URL_PREFIX.len()..]
    }

    /// The full URL.
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SheetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Decode a page served as Shift_JIS.
pub fn decode_shift_jis(bytes: &[u8]) -> String {
    decode(bytes, SHIFT_JIS)
}

/// Decode a page using a WHATWG encoding label (`shift_jis`, `utf-8`, ...).
pub fn decode_with_label(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))?;
    Ok(decode(bytes, encoding))
}

fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(
            encoding = actual.name(),
            "page contained malformed sequences; replaced with U+FFFD"
        );
    }
    text.into_owned()
}

/// Downloads sheet pages.
#[derive(Debug, Clone)]
pub struct SheetFetcher {
    client: reqwest::Client,
}

impl SheetFetcher {
    /// Create a fetcher with no request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Create a fetcher, optionally bounding each request.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetch a sheet page and decode it to UTF-8.
    ///
    /// Non-success statuses are errors. There are no retries.
    pub async fn fetch(&self, url: &SheetUrl) -> Result<String> {
        tracing::debug!(url = %url, "fetching character sheet");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        tracing::debug!(url = %url, bytes = bytes.len(), "fetched character sheet");
        Ok(decode_shift_jis(&bytes))
    }
}
