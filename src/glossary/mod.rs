//! Glossary output sink
//!
//! Thin JSON-lines writer for the converted glossary: one info record first,
//! then one serialized entry per line, in dump order. The interesting work
//! happens upstream in [`crate::dump`]; this module is deliberately plain
//! glue so other glossary formats can replace it wholesale.

use crate::dump::{DumpError, GlossaryEntry, SITEINFO_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

/// Metadata record written before any entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryInfo {
    /// Opaque metadata blobs keyed by name
    pub info: BTreeMap<String, String>,
}

impl GlossaryInfo {
    /// Build the info record from the raw site-info block
    pub fn from_site_info(site_info: impl Into<String>) -> Self {
        let mut info = BTreeMap::new();
        info.insert(SITEINFO_KEY.to_string(), site_info.into());
        Self { info }
    }
}

/// JSON-lines glossary writer
pub struct GlossaryWriter<W: Write> {
    out: W,
    entries_written: usize,
}

impl<W: Write> GlossaryWriter<W> {
    /// Wrap an output stream and write the info record immediately, so
    /// metadata precedes every entry.
    pub fn new(mut out: W, info: &GlossaryInfo) -> Result<Self, DumpError> {
        let json = serde_json::to_string(info)?;
        writeln!(out, "{}", json)?;
        Ok(Self {
            out,
            entries_written: 0,
        })
    }

    /// Write one entry as a JSON line
    pub fn write_entry(&mut self, entry: &GlossaryEntry) -> Result<(), DumpError> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.out, "{}", json)?;
        self.entries_written += 1;
        Ok(())
    }

    /// Number of entries written so far
    pub fn entries_written(&self) -> usize {
        self.entries_written
    }

    /// Flush the underlying stream
    pub fn finish(mut self) -> Result<(), DumpError> {
        self.out.flush()?;
        Ok(())
    }
}
