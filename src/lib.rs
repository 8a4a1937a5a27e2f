//! Streaming glossary reader for MediaWiki-style XML dumps
//!
//! Reads a (possibly multi-gigabyte) Wiktionary dump in bounded memory and
//! yields glossary entries, featuring:
//! - Line-based page boundary scanning (no whole-file buffering)
//! - Per-page XML fragment parsing via quick-xml
//! - An ordered wikitext-to-HTML rewrite rule cascade
//! - Byte-accurate progress reporting per entry
//! - Plain `.xml` and bzip2-compressed `.xml.bz2` input

pub mod config;
pub mod dump;
pub mod glossary;

pub use config::Config;
pub use dump::{DumpError, EntrySource, GlossaryEntry, WiktionarySource};
