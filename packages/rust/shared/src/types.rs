//! Core domain types for a single anchor-text extraction.

use serde::{Deserialize, Serialize};
use url::Url;

/// Class token identifying the Elementor post-content widget.
pub const CONTENT_MARKER: &str = "elementor-widget-theme-post-content";

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A fetched page: the response body as text and the URL it came from
/// (after redirects).
#[derive(Debug, Clone)]
pub struct Document {
    /// Final URL of the response.
    pub url: Url,
    /// Decoded response body.
    pub body: String,
}

impl Document {
    pub fn new(url: Url, body: impl Into<String>) -> Self {
        Self {
            url,
            body: body.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AnchorRecord
// ---------------------------------------------------------------------------

/// Visible text of one hyperlink inside a content region.
///
/// Always trimmed and never empty; construct through [`AnchorRecord::new`].
/// Deserialization goes through the same check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnchorRecord(String);

impl AnchorRecord {
    /// Trim `text` and wrap it, or `None` if nothing is left.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for AnchorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AnchorRecord {
    type Error = String;

    fn try_from(text: String) -> std::result::Result<Self, Self::Error> {
        Self::new(&text).ok_or_else(|| "anchor text must not be blank".to_string())
    }
}

impl From<AnchorRecord> for String {
    fn from(record: AnchorRecord) -> Self {
        record.0
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Advisory outcome attached to an empty but successful extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// No element carried the content marker class.
    NoRegionFound,
    /// Content regions exist but hold no link with non-empty text.
    NoAnchorsFound,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRegionFound => {
                write!(f, "no element with class '{CONTENT_MARKER}' found on the page")
            }
            Self::NoAnchorsFound => write!(f, "content region contains no linked text"),
        }
    }
}

/// Successful result of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// URL the document was served from.
    pub url: String,
    /// Number of content regions located.
    pub regions: usize,
    /// Anchor texts in region order, then link order.
    pub anchors: Vec<AnchorRecord>,
    /// Set when `anchors` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl Extraction {
    /// Anchor texts as plain string slices.
    pub fn texts(&self) -> Vec<&str> {
        self.anchors.iter().map(AnchorRecord::as_str).collect()
    }
}
