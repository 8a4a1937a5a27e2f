//! End-to-end tests over miniature dump files

use std::io::Write;
use wikidump_glossary::dump::{EntrySource, WiktionarySource};
use wikidump_glossary::glossary::{GlossaryInfo, GlossaryWriter};

const TWO_PAGE_DUMP: &str = r#"<mediawiki xmlns="http://www.mediawiki.org/xml/export-0.10/">
  <siteinfo>
    <sitename>Wiktionary</sitename>
    <generator>MediaWiki 1.41</generator>
  </siteinfo>
  <page>
    <title>apple</title>
    <ns>0</ns>
    <revision>
      <text>==English==
===Noun===
# A round [[fruit]] of the tree ''Malus domestica''.
* {{nl}}: [[appel]]
{{qualifier|countable}}</text>
    </revision>
  </page>
  <page>
    <title>textless</title>
    <ns>0</ns>
    <revision>
    </revision>
  </page>
</mediawiki>
"#;

fn write_dump(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn two_page_dump_yields_one_entry() {
    let file = write_dump(TWO_PAGE_DUMP, ".xml");
    let mut source = WiktionarySource::open(file.path()).unwrap();

    assert!(source.site_info().contains("<sitename>Wiktionary</sitename>"));

    let entries: Vec<_> = source
        .iter_entries()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.title, "apple");
    assert!(entry.html.contains("<h2>English</h2>"));
    assert!(entry.html.contains("<h3>Noun</h3>"));
    assert!(entry.html.contains(r#"<a href="bword://fruit">fruit</a>"#));
    assert!(entry.html.contains("<h3>nl</h3>"));
    assert!(entry.html.contains("<i>(countable)</i>"));
    assert!(!entry.html.contains("[["));

    assert_eq!(source.pages_skipped(), 1);

    let (consumed, total) = entry.progress;
    assert_eq!(total, TWO_PAGE_DUMP.len() as u64);
    assert!(consumed > 0 && consumed <= total);
}

#[test]
fn bzip2_dump_round_trips() {
    let mut compressed = Vec::new();
    {
        let mut encoder =
            bzip2::write::BzEncoder::new(&mut compressed, bzip2::Compression::default());
        encoder.write_all(TWO_PAGE_DUMP.as_bytes()).unwrap();
        encoder.finish().unwrap();
    }

    let mut file = tempfile::Builder::new()
        .suffix(".xml.bz2")
        .tempfile()
        .unwrap();
    file.write_all(&compressed).unwrap();
    file.flush().unwrap();

    let mut source = WiktionarySource::open(file.path()).unwrap();
    assert!(source.site_info().contains("Wiktionary"));

    let entries: Vec<_> = source
        .iter_entries()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "apple");
}

#[test]
fn dump_to_glossary_jsonl() {
    let file = write_dump(TWO_PAGE_DUMP, ".xml");
    let mut source = WiktionarySource::open(file.path()).unwrap();

    let info = GlossaryInfo::from_site_info(source.site_info());
    let mut out = Vec::new();
    {
        let mut writer = GlossaryWriter::new(&mut out, &info).unwrap();
        for entry in source.iter_entries() {
            writer.write_entry(&entry.unwrap()).unwrap();
        }
        writer.finish().unwrap();
    }

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("siteinfo"));
    assert!(lines[1].contains("\"title\":\"apple\""));
}

#[test]
fn offsets_non_decreasing_across_many_pages() {
    let mut dump = String::from("<mediawiki>\n<siteinfo>\n</siteinfo>\n");
    for i in 0..20 {
        dump.push_str(&format!(
            "<page>\n<title>word{i}</title>\n<text>Definition {i} of [[word{i}]].</text>\n</page>\n"
        ));
    }
    dump.push_str("</mediawiki>\n");

    let file = write_dump(&dump, ".xml");
    let mut source = WiktionarySource::open(file.path()).unwrap();

    let mut last = 0;
    let mut count = 0;
    for entry in source.iter_entries() {
        let entry = entry.unwrap();
        let (consumed, total) = entry.progress;
        assert!(consumed >= last, "offsets must be non-decreasing");
        assert!(consumed <= total);
        last = consumed;
        count += 1;
    }
    assert_eq!(count, 20);
}

#[test]
fn malformed_page_aborts_without_corrupting_state() {
    let dump = "<mediawiki>\n<siteinfo>\n</siteinfo>\n\
        <page>\n<title>good</title>\n<text>fine</text>\n</page>\n\
        <page>\n<title>bad</title>\n<text>oops</mismatch>\n</page>\n\
        </mediawiki>\n";

    let file = write_dump(dump, ".xml");
    let mut source = WiktionarySource::open(file.path()).unwrap();

    let first = source.next_entry().unwrap().unwrap();
    assert_eq!(first.title, "good");

    // The malformed page surfaces as an error rather than being masked
    assert!(source.next_entry().is_err());
}

#[test]
fn parse_error_leaves_next_fragment_intact() {
    let dump = "<mediawiki>\n<siteinfo>\n</siteinfo>\n\
        <page>\n<title>bad</title>\n<text>oops</mismatch>\n</page>\n\
        <page>\n<title>good</title>\n<text>fine</text>\n</page>\n\
        </mediawiki>\n";

    let file = write_dump(dump, ".xml");
    let mut source = WiktionarySource::open(file.path()).unwrap();

    assert!(source.next_entry().is_err());

    // Should the caller choose to continue, the scanner buffer was cleared at
    // hand-off, so the following page still parses cleanly
    let next = source.next_entry().unwrap().unwrap();
    assert_eq!(next.title, "good");
    assert!(source.next_entry().unwrap().is_none());
}
