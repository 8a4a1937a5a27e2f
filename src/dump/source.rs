//! Core types and traits for dump-to-glossary conversion

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metadata key under which the raw site-info block is exposed
pub const SITEINFO_KEY: &str = "siteinfo";

/// URI scheme prefixing internal-link targets; resolved by the downstream
/// glossary consumer for cross-reference lookup
pub const LOOKUP_SCHEME: &str = "bword://";

/// A glossary entry produced from one dump page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryEntry {
    /// Page title, taken verbatim from the dump
    pub title: String,
    /// Rendered HTML body
    pub html: String,
    /// `(bytes_consumed, total_bytes)` at the time the entry was produced
    pub progress: (u64, u64),
}

impl GlossaryEntry {
    /// Create a new entry
    pub fn new(title: impl Into<String>, html: impl Into<String>, progress: (u64, u64)) -> Self {
        Self {
            title: title.into(),
            html: html.into(),
            progress,
        }
    }

    /// Fraction of the dump consumed when this entry was produced, in [0, 1]
    pub fn progress_ratio(&self) -> f64 {
        let (consumed, total) = self.progress;
        if total == 0 {
            0.0
        } else {
            (consumed as f64 / total as f64).min(1.0)
        }
    }
}

/// A page record parsed from one `<page>` fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Text content of the first `title` descendant
    pub title: String,
    /// Text content of the first `text` descendant (raw wikitext)
    pub text: String,
    /// Stream cursor position immediately after the fragment's closing marker
    pub byte_offset: u64,
}

/// Trait for sources that yield glossary entries
pub trait EntrySource {
    /// Iterate over entries in dump order; finite, forward-only
    fn iter_entries(&mut self) -> Box<dyn Iterator<Item = Result<GlossaryEntry, DumpError>> + '_>;

    /// Current byte position in the (decoded) stream
    fn byte_position(&self) -> u64;

    /// Total input size in bytes (on-disk size)
    fn total_bytes(&self) -> u64;

    /// Source name for display
    fn source_name(&self) -> &str;
}

/// Conversion statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertStats {
    /// Entries written to the glossary
    pub entries_written: usize,
    /// Pages skipped (missing title or text)
    pub pages_skipped: usize,
    /// Bytes of the decoded stream consumed
    pub bytes_processed: u64,
    /// Processing time in seconds
    pub elapsed_seconds: f64,
    /// Entries per second
    pub entries_per_second: f64,
}

impl ConvertStats {
    /// Recalculate the entries-per-second rate
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.entries_per_second = self.entries_written as f64 / self.elapsed_seconds;
        }
    }
}

/// Errors that can occur while reading a dump
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("site-info block not found before end of stream")]
    SiteInfoMissing,

    #[error("page fragment parse error: {0}")]
    FragmentParse(String),

    #[error("UTF-8 decode error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<quick_xml::Error> for DumpError {
    fn from(e: quick_xml::Error) -> Self {
        DumpError::FragmentParse(e.to_string())
    }
}

/// Dump input format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DumpFormat {
    /// Uncompressed XML
    PlainXml,
    /// Bzip2-compressed XML
    Bzip2Xml,
}

impl DumpFormat {
    /// Detect format from file path
    pub fn detect(path: &std::path::Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if name.ends_with(".bz2") {
            DumpFormat::Bzip2Xml
        } else {
            DumpFormat::PlainXml
        }
    }
}
