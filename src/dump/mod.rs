//! Streaming dump-to-glossary pipeline
//!
//! Turns a MediaWiki-style XML dump into a lazy sequence of glossary entries
//! in bounded memory. The pipeline is pull-driven, one page at a time:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      WiktionarySource                        │
//! │            (open file, site-info, entry iterator)            │
//! └──────────────────────────────────────────────────────────────┘
//!        │                  │                     │
//!        ▼                  ▼                     ▼
//! ┌─────────────┐   ┌───────────────┐   ┌──────────────────┐
//! │ DumpScanner │──▶│ fragment      │──▶│ WikitextRenderer │
//! │ line-based  │   │ parse_page    │   │ ordered rule     │
//! │ boundaries  │   │ (quick-xml)   │   │ cascade → HTML   │
//! └─────────────┘   └───────────────┘   └──────────────────┘
//! ```
//!
//! The scanner emits raw `<page>` fragments in strict file order; the
//! fragment parser turns each into a page record or a deliberate skip; the
//! renderer rewrites wikitext into glossary HTML. Entry assembly attaches
//! `(bytes_consumed, total_bytes)` so callers can show a percentage without
//! re-scanning.
//!
//! # Example
//!
//! ```no_run
//! use wikidump_glossary::dump::{EntrySource, WiktionarySource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = WiktionarySource::open("enwiktionary-latest-pages-articles.xml.bz2")?;
//! println!("site info: {} bytes", source.site_info().len());
//! for entry in source.iter_entries() {
//!     let entry = entry?;
//!     println!("{}: {} bytes of HTML", entry.title, entry.html.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod fragment;
pub mod progress;
pub mod scanner;
pub mod source;
pub mod wikitext;
pub mod wiktionary;

// Re-export main types
pub use progress::ConvertProgress;
pub use scanner::DumpScanner;
pub use source::{
    ConvertStats, DumpError, DumpFormat, EntrySource, GlossaryEntry, PageRecord, LOOKUP_SCHEME,
    SITEINFO_KEY,
};
pub use wikitext::WikitextRenderer;
pub use wiktionary::WiktionarySource;
