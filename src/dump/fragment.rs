//! Page fragment parsing
//!
//! A fragment is the raw byte span of one `<page>...</page>` block as handed
//! off by the scanner. It is parsed here as a standalone XML subtree with
//! streaming events, so no document root for the whole dump is required.

use super::source::{DumpError, PageRecord};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::debug;

/// Parse one raw fragment into a [`PageRecord`].
///
/// Extracts the text content of the first `title` descendant and the first
/// `text` descendant. Returns `Ok(None)` when either is absent or empty (the
/// page is deliberately skipped, not an error). Unbalanced or otherwise
/// invalid XML fails with [`DumpError::FragmentParse`]; the caller decides
/// whether to abort, since fragment boundaries cannot be trusted afterwards.
///
/// `byte_offset` is the stream cursor position just past the fragment's
/// closing marker and is recorded on the returned record.
pub fn parse_page(fragment: &[u8], byte_offset: u64) -> Result<Option<PageRecord>, DumpError> {
    let mut reader = Reader::from_reader(fragment);
    let mut buf = Vec::with_capacity(fragment.len().min(8192));
    let mut text_buf = String::new();

    let mut title: Option<String> = None;
    let mut text: Option<String> = None;
    let mut capturing: Option<&'static str> = None;
    let mut depth: usize = 0;

    loop {
        let event = reader.read_event_into(&mut buf)?;

        match event {
            Event::Start(ref e) => {
                depth += 1;
                match e.name().as_ref() {
                    b"title" if title.is_none() => {
                        capturing = Some("title");
                        text_buf.clear();
                    }
                    b"text" if text.is_none() => {
                        capturing = Some("text");
                        text_buf.clear();
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                if capturing.is_some() {
                    if let Ok(t) = e.unescape() {
                        text_buf.push_str(&t);
                    }
                }
            }
            Event::CData(ref e) => {
                if capturing.is_some() {
                    if let Ok(t) = String::from_utf8(e.to_vec()) {
                        text_buf.push_str(&t);
                    }
                }
            }
            Event::End(ref e) => {
                if depth == 0 {
                    return Err(DumpError::FragmentParse(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                depth -= 1;
                match (capturing, e.name().as_ref()) {
                    (Some("title"), b"title") => {
                        title = Some(text_buf.clone());
                        capturing = None;
                    }
                    (Some("text"), b"text") => {
                        text = Some(text_buf.clone());
                        capturing = None;
                    }
                    _ => {}
                }
            }
            Event::Eof => {
                if depth != 0 {
                    return Err(DumpError::FragmentParse(
                        "fragment ended with unclosed elements".into(),
                    ));
                }
                break;
            }
            _ => {}
        }

        buf.clear();
    }

    let title = match title {
        Some(t) if !t.is_empty() => t,
        _ => {
            debug!("skipping page without title");
            return Ok(None);
        }
    };
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => {
            debug!(%title, "skipping page without text");
            return Ok(None);
        }
    };

    Ok(Some(PageRecord {
        title,
        text,
        byte_offset,
    }))
}
