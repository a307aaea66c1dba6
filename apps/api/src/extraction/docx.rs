use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{ExtractionError, TextExtractor};

const DOCUMENT_PART: &str = "word/document.xml";

/// DOCX raw-text extractor.
///
/// Reads `word/document.xml` out of the OOXML zip container and keeps the run
/// text: `<w:t>` content, tabs and breaks inside runs, one newline per
/// paragraph. Formatting, headers/footers and deleted revisions are ignored.
///
/// The decompressed document part is capped at `max_xml_bytes`; a container
/// that inflates past it is rejected before the XML is parsed.
pub struct DocxTextExtractor {
    max_xml_bytes: usize,
}

impl DocxTextExtractor {
    pub fn new(max_xml_bytes: usize) -> Self {
        Self { max_xml_bytes }
    }
}

impl TextExtractor for DocxTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractionError::Docx(format!("not a DOCX container: {e}")))?;

        let entry = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| ExtractionError::Docx(format!("missing {DOCUMENT_PART}: {e}")))?;

        let limit = self.max_xml_bytes as u64;
        let mut xml = String::new();
        entry
            .take(limit + 1)
            .read_to_string(&mut xml)
            .map_err(|e| ExtractionError::Docx(format!("unreadable {DOCUMENT_PART}: {e}")))?;

        if xml.len() as u64 > limit {
            return Err(ExtractionError::Docx(format!(
                "{DOCUMENT_PART} exceeds {} bytes when decompressed",
                self.max_xml_bytes
            )));
        }

        document_xml_to_text(&xml)
    }
}

fn document_xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::with_capacity(xml.len() / 4);
    let mut in_text = false;
    // Tab stops in paragraph properties are also `<w:tab>`; only run tabs count.
    let mut in_paragraph_props = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractionError::Docx(format!("malformed {DOCUMENT_PART}: {e}")))?;

        match event {
            Event::Start(tag) => match tag.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:pPr" => in_paragraph_props = true,
                b"w:tab" if !in_paragraph_props => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                _ => {}
            },
            Event::Empty(tag) => match tag.name().as_ref() {
                b"w:tab" if !in_paragraph_props => out.push('\t'),
                b"w:br" | b"w:cr" | b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::End(tag) => match tag.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:pPr" => in_paragraph_props = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Text(text) if in_text => {
                let text = text
                    .unescape()
                    .map_err(|e| ExtractionError::Docx(format!("bad text in {DOCUMENT_PART}: {e}")))?;
                out.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}
