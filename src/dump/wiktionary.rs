//! Wiktionary XML dump source
//!
//! Opens a MediaWiki-style dump file (plain or bzip2-compressed), reads the
//! site-info block eagerly and then yields glossary entries lazily, one page
//! at a time. Memory use is bounded to one fragment plus one rendered body
//! regardless of dump size.

use super::fragment;
use super::scanner::DumpScanner;
use super::source::{DumpError, DumpFormat, EntrySource, GlossaryEntry};
use super::wikitext::WikitextRenderer;
use bzip2::read::BzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DEFAULT_BUFFER_CAPACITY: usize = 1024 * 1024;

/// Buffered reader over the two supported input formats
enum DumpInput {
    /// Uncompressed XML
    Plain(BufReader<File>),
    /// Bzip2-compressed XML
    Bzip2(BufReader<BzDecoder<File>>),
}

impl Read for DumpInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            DumpInput::Plain(r) => r.read(buf),
            DumpInput::Bzip2(r) => r.read(buf),
        }
    }
}

impl BufRead for DumpInput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            DumpInput::Plain(r) => r.fill_buf(),
            DumpInput::Bzip2(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            DumpInput::Plain(r) => r.consume(amt),
            DumpInput::Bzip2(r) => r.consume(amt),
        }
    }
}

/// Streaming glossary source over a Wiktionary dump file
pub struct WiktionarySource {
    /// Path to the dump file
    path: PathBuf,
    /// Boundary scanner over the decoded stream
    scanner: DumpScanner<DumpInput>,
    /// Wikitext renderer
    renderer: WikitextRenderer,
    /// Raw site-info block, read once at open time
    site_info: String,
    /// On-disk input size; for bzip2 dumps the byte cursor counts decoded
    /// bytes, so progress against this total is approximate
    total_bytes: u64,
    /// Pages skipped for missing title or text
    pages_skipped: u64,
}

impl WiktionarySource {
    /// Open a dump file with the default read buffer
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DumpError> {
        Self::open_with_capacity(path, DEFAULT_BUFFER_CAPACITY)
    }

    /// Open a dump file with an explicit read buffer capacity.
    ///
    /// The site-info block is consumed here; a dump without one fails
    /// immediately with [`DumpError::SiteInfoMissing`].
    pub fn open_with_capacity(
        path: impl AsRef<Path>,
        buffer_capacity: usize,
    ) -> Result<Self, DumpError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let total_bytes = file.metadata()?.len();

        let input = match DumpFormat::detect(&path) {
            DumpFormat::Bzip2Xml => {
                DumpInput::Bzip2(BufReader::with_capacity(buffer_capacity, BzDecoder::new(file)))
            }
            DumpFormat::PlainXml => {
                DumpInput::Plain(BufReader::with_capacity(buffer_capacity, file))
            }
        };

        let mut scanner = DumpScanner::new(input);
        let site_info = scanner.read_site_info()?;
        info!(
            path = %path.display(),
            total_bytes,
            site_info_bytes = site_info.len(),
            "opened dump"
        );

        Ok(Self {
            path,
            scanner,
            renderer: WikitextRenderer::new(),
            site_info,
            total_bytes,
            pages_skipped: 0,
        })
    }

    /// The raw site-info block. It is forwarded verbatim to the glossary
    /// metadata sink and not parsed further.
    pub fn site_info(&self) -> &str {
        &self.site_info
    }

    /// Produce the next entry, skipping pages without title or text.
    /// Returns `Ok(None)` at end of pages.
    pub fn next_entry(&mut self) -> Result<Option<GlossaryEntry>, DumpError> {
        loop {
            let fragment_bytes = match self.scanner.next_fragment()? {
                Some(bytes) => bytes,
                None => return Ok(None),
            };
            let offset = self.scanner.bytes_read();

            match fragment::parse_page(&fragment_bytes, offset)? {
                Some(record) => {
                    let html = self.renderer.render(&record.text);
                    debug!(title = %record.title, offset = record.byte_offset, "rendered entry");
                    return Ok(Some(GlossaryEntry::new(
                        record.title,
                        html,
                        (record.byte_offset, self.total_bytes),
                    )));
                }
                None => {
                    self.pages_skipped += 1;
                    continue;
                }
            }
        }
    }

    /// Pages skipped so far for missing title or text
    pub fn pages_skipped(&self) -> u64 {
        self.pages_skipped
    }
}

impl EntrySource for WiktionarySource {
    fn iter_entries(&mut self) -> Box<dyn Iterator<Item = Result<GlossaryEntry, DumpError>> + '_> {
        Box::new(WiktionaryIterator { source: self })
    }

    fn byte_position(&self) -> u64 {
        self.scanner.bytes_read()
    }

    fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    fn source_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("wiktionary dump")
    }
}

/// Iterator over entries in a dump
struct WiktionaryIterator<'a> {
    source: &'a mut WiktionarySource,
}

impl Iterator for WiktionaryIterator<'_> {
    type Item = Result<GlossaryEntry, DumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.source.next_entry().transpose()
    }
}
