//! Line-accumulating boundary scanner for dump streams
//!
//! Splits an unbounded byte stream into the site-info block and a sequence of
//! raw `<page>` fragments without ever holding more than one fragment in
//! memory. The scanner is an explicit accumulate-then-hand-off state machine:
//! lines are appended to an internal buffer until a closing marker is seen,
//! at which point the whole buffer is handed off and cleared in one step.

use super::source::DumpError;
use std::io::BufRead;
use tracing::debug;

const SITEINFO_OPEN: &[u8] = b"<siteinfo>";
const SITEINFO_CLOSE: &[u8] = b"</siteinfo>";
const PAGE_CLOSE: &[u8] = b"</page>";

/// Scanner over a buffered dump stream, tracking bytes consumed
pub struct DumpScanner<R: BufRead> {
    reader: R,
    /// Fragment accumulation buffer; cleared only by a successful hand-off
    buf: Vec<u8>,
    /// Bytes of the (decoded) stream consumed so far
    bytes_read: u64,
}

impl<R: BufRead> DumpScanner<R> {
    /// Wrap a buffered reader positioned at the start of the dump
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            bytes_read: 0,
        }
    }

    /// Bytes consumed from the stream so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Read one line (including its terminator) into `line`.
    /// Returns false at end of stream.
    fn read_line(&mut self, line: &mut Vec<u8>) -> Result<bool, DumpError> {
        line.clear();
        let n = self.reader.read_until(b'\n', line)?;
        self.bytes_read += n as u64;
        Ok(n > 0)
    }

    /// Scan forward to a line containing `marker`, appending every preceding
    /// line to the internal buffer. The marker line itself is returned and
    /// not buffered. Returns None if the stream ends first.
    fn read_until(&mut self, marker: &[u8]) -> Result<Option<Vec<u8>>, DumpError> {
        let mut line = Vec::new();
        while self.read_line(&mut line)? {
            if contains(&line, marker) {
                return Ok(Some(line));
            }
            self.buf.extend_from_slice(&line);
        }
        Ok(None)
    }

    /// Consume the stream through the closing site-info marker and return the
    /// block from the opening marker line through the closing marker line,
    /// decoded as UTF-8 (lossy). Everything before the opening marker (the
    /// XML declaration and the root element line) is discarded.
    ///
    /// Fails with [`DumpError::SiteInfoMissing`] if either marker never
    /// appears, which indicates a malformed dump.
    pub fn read_site_info(&mut self) -> Result<String, DumpError> {
        let open_line = self
            .read_until(SITEINFO_OPEN)?
            .ok_or(DumpError::SiteInfoMissing)?;

        // Drop the preamble, keep the block itself
        self.buf.clear();
        self.buf.extend_from_slice(&open_line);

        let close_line = self
            .read_until(SITEINFO_CLOSE)?
            .ok_or(DumpError::SiteInfoMissing)?;
        self.buf.extend_from_slice(&close_line);

        let block = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        debug!(bytes = block.len(), "extracted site-info block");
        Ok(block)
    }

    /// Accumulate lines until one containing `</page>` is read, then hand off
    /// the whole buffer including that line. Returns `Ok(None)` once the
    /// stream is exhausted; a partially accumulated tail at EOF is discarded.
    pub fn next_fragment(&mut self) -> Result<Option<Vec<u8>>, DumpError> {
        match self.read_until(PAGE_CLOSE)? {
            Some(close_line) => {
                let mut fragment = std::mem::take(&mut self.buf);
                fragment.extend_from_slice(&close_line);
                Ok(Some(fragment))
            }
            None => {
                if !self.buf.is_empty() {
                    debug!(
                        bytes = self.buf.len(),
                        "discarding partial fragment at end of stream"
                    );
                    self.buf.clear();
                }
                Ok(None)
            }
        }
    }
}

/// Byte-slice substring search over a single line
fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}
