//! Suffix source document fetching and line extraction.
//!
//! The scan consumes an ordered list of domain suffixes obtained from a
//! remote text document, by default the public suffix list. Fetching is a
//! plain HTTP GET; extraction is line-based and deliberately minimal, per
//! the non-goal of validating suffix syntax.

use crate::error::NsSweepError;
use std::time::Duration;
use tracing::debug;

/// Fetches the suffix source document over HTTP.
pub struct SuffixSource {
    /// HTTP client for the document fetch
    http_client: reqwest::Client,
    /// URL of the source document
    url: String,
}

impl SuffixSource {
    /// Create a source for the given document URL.
    pub fn new<U: Into<String>>(url: U) -> Result<Self, NsSweepError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| NsSweepError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    /// Fetch the document and extract the suffix list from it.
    ///
    /// # Errors
    ///
    /// Returns `NsSweepError::SourceFetch` if the request fails or the
    /// server answers with a non-success status. Callers treat this as
    /// non-fatal and may continue with an empty list.
    pub async fn fetch(&self) -> Result<Vec<String>, NsSweepError> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| NsSweepError::source_fetch(&self.url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NsSweepError::source_fetch(
                &self.url,
                format!("HTTP status {}", status),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| NsSweepError::source_fetch(&self.url, e.to_string()))?;

        let suffixes = extract_suffixes(&body);
        debug!(url = %self.url, count = suffixes.len(), "fetched suffix list");
        Ok(suffixes)
    }

    /// The URL this source reads from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Extract suffixes from the source document text.
///
/// One suffix per line. Blank lines and comment lines (leading slash) are
/// dropped; every remaining line is kept verbatim after trimming. Source
/// order is preserved so partitioning stays deterministic.
pub fn extract_suffixes(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('/'))
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_drops_comments_and_blanks() {
        let text = "/* comment */\n.com\n.io\n";
        assert_eq!(extract_suffixes(text), vec![".com", ".io"]);
    }

    #[test]
    fn test_extract_psl_style_document() {
        let text = "// ===BEGIN ICANN DOMAINS===\n\ncom\n\nco.uk\n// comment\nio\n";
        assert_eq!(extract_suffixes(text), vec!["com", "co.uk", "io"]);
    }

    #[test]
    fn test_extract_trims_whitespace() {
        let text = "  com  \n\t org\n";
        assert_eq!(extract_suffixes(text), vec!["com", "org"]);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let text = "// header\n.com\n\n.io\n";
        let once = extract_suffixes(text);
        let twice = extract_suffixes(&once.join("\n"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_extract_empty_document() {
        assert!(extract_suffixes("").is_empty());
        assert!(extract_suffixes("\n\n// only comments\n").is_empty());
    }

    #[test]
    fn test_extract_preserves_order() {
        let text = "zz\naa\nmm\n";
        assert_eq!(extract_suffixes(text), vec!["zz", "aa", "mm"]);
    }
}
