//! Text extraction for resumes and job descriptions (PDF, DOCX).
//!
//! Callers supply bytes plus a format tag; this module returns plain UTF-8
//! text from the embedded text layer. There is no OCR and no image handling.
//!
//! Formats are a closed set ([`DocumentFormat`]). Each one has a
//! [`TextExtractor`], so adding a format means adding a variant and an
//! extractor without touching call sites.

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{Document, RawText};

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Maximum decompressed bytes to read from a single ZIP entry (zip-bomb protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 2] = [DocumentFormat::Pdf, DocumentFormat::Docx];

    /// Resolve a tag: a short name (`pdf`, `.docx`) or a MIME type.
    /// Matching is case-insensitive.
    pub fn from_tag(tag: &str) -> Result<Self, ExtractError> {
        let normalized = tag.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| normalized == f.tag() || normalized == f.mime_type())
            .ok_or_else(|| ExtractError::UnsupportedFormat(tag.to_string()))
    }

    /// Resolve the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_tag(&ext)
    }

    pub fn tag(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => MIME_PDF,
            DocumentFormat::Docx => MIME_DOCX,
        }
    }

    pub fn extractor(self) -> &'static dyn TextExtractor {
        match self {
            DocumentFormat::Pdf => &PdfExtractor,
            DocumentFormat::Docx => &DocxExtractor,
        }
    }

    /// Comma-separated short tags, for messages.
    pub fn supported_tags() -> String {
        DocumentFormat::ALL
            .iter()
            .map(|f| f.tag())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for DocumentFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Pulls plain text out of one document format.
pub trait TextExtractor: Send + Sync {
    fn format(&self) -> DocumentFormat;

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Extracts the text of a document, dispatching on its format tag.
pub fn extract_text(document: &Document) -> Result<RawText, ExtractError> {
    let format = DocumentFormat::from_tag(document.format_tag())?;
    let text = format.extractor().extract(document.bytes())?;
    debug!(
        document = document.label(),
        %format,
        bytes = document.bytes().len(),
        chars = text.chars().count(),
        "extracted text"
    );
    Ok(RawText::from(text))
}

// ── PDF ──────────────────────────────────────────────────────────────────

/// Concatenates the text layer of every page, in page order.
///
/// Any failure fails the whole document. The page count from the page
/// tree is checked against the pages extracted, so none are skipped.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        // pdf-extract panics on some malformed inputs instead of erroring
        let (expected, pages) = std::panic::catch_unwind(|| {
            let expected = lopdf::Document::load_mem(bytes)
                .map_err(|e| ExtractError::Pdf(e.to_string()))?
                .get_pages()
                .len();
            let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
                .map_err(|e| ExtractError::Pdf(e.to_string()))?;
            Ok::<_, ExtractError>((expected, pages))
        })
        .map_err(|_| ExtractError::Pdf("parser panicked on malformed input".to_string()))??;

        let pages = ensure_all_pages(pages, expected)?;
        debug!(pages = pages.len(), "extracted PDF pages");
        Ok(pages.join("\n"))
    }
}

/// pdf-extract stops at the first page it cannot read without reporting it.
fn ensure_all_pages(pages: Vec<String>, expected: usize) -> Result<Vec<String>, ExtractError> {
    if pages.len() < expected {
        return Err(ExtractError::Pdf(format!(
            "extracted {} of {} pages",
            pages.len(),
            expected
        )));
    }
    Ok(pages)
}

// ── DOCX ─────────────────────────────────────────────────────────────────

/// Extracts headers, body, and footers of a WordprocessingML package.
///
/// Paragraph ends and `w:br`/`w:cr` become newlines, `w:tab` a tab.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
            .map_err(|e| ExtractError::Docx(e.to_string()))?;

        if !archive.file_names().any(|n| n == DOCX_BODY) {
            return Err(ExtractError::Docx(format!("{} not found", DOCX_BODY)));
        }

        let mut parts = list_numbered_parts(&archive, "word/header");
        parts.push(DOCX_BODY.to_string());
        parts.extend(list_numbered_parts(&archive, "word/footer"));

        let mut out = String::new();
        for name in parts {
            let xml = read_zip_entry_bounded(&mut archive, &name, MAX_XML_ENTRY_BYTES)?;
            let text = extract_wordprocessing_text(&xml)?;
            let text = text.trim_end();
            if text.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(text);
        }
        Ok(out)
    }
}

fn read_zip_entry_bounded(
    archive: &mut zip::ZipArchive<std::io::Cursor<&[u8]>>,
    name: &str,
    max_bytes: u64,
) -> Result<Vec<u8>, ExtractError> {
    let entry = archive
        .by_name(name)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut out = Vec::new();
    entry
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut out)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    if out.len() as u64 > max_bytes {
        return Err(ExtractError::Docx(format!(
            "ZIP entry {} exceeds size limit ({} bytes)",
            name, max_bytes
        )));
    }
    Ok(out)
}

/// Entries named `<prefix><n>.xml`, sorted by `n`.
fn list_numbered_parts(
    archive: &zip::ZipArchive<std::io::Cursor<&[u8]>>,
    prefix: &str,
) -> Vec<String> {
    let mut names: Vec<String> = archive
        .file_names()
        .filter(|n| n.starts_with(prefix) && n.ends_with(".xml"))
        .map(|s| s.to_string())
        .collect();
    names.sort_by_key(|name| {
        name.trim_start_matches(prefix)
            .trim_end_matches(".xml")
            .parse::<u32>()
            .unwrap_or(u32::MAX)
    });
    names
}

fn extract_wordprocessing_text(xml: &[u8]) -> Result<String, ExtractError> {
    use quick_xml::events::Event;

    let mut out = String::new();
    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut in_text = false;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = true;
                }
            }
            Ok(Event::Text(te)) if in_text => {
                let text = te.unescape().map_err(|e| ExtractError::Docx(e.to_string()))?;
                out.push_str(&text);
            }
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
            for (name, body) in entries {
                zip.start_file(*name, zip::write::SimpleFileOptions::default())
                    .unwrap();
                zip.write_all(body.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buf
    }

    fn word_xml(body: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?><w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{}</w:body></w:document>",
            body
        )
    }

    fn doc(tag: &str, bytes: Vec<u8>) -> Document {
        Document::new("test", tag, bytes)
    }

    #[test]
    fn format_tags_resolve_case_insensitively() {
        assert_eq!(DocumentFormat::from_tag("pdf").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_tag(".PDF").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_tag("DOCX").unwrap(), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_tag(MIME_DOCX).unwrap(), DocumentFormat::Docx);
        assert_eq!("application/pdf".parse::<DocumentFormat>().unwrap(), DocumentFormat::Pdf);
    }

    #[test]
    fn unknown_tags_are_unsupported() {
        for tag in ["txt", "", "doc", "text/plain", "pptx"] {
            let err = DocumentFormat::from_tag(tag).unwrap_err();
            assert!(matches!(err, ExtractError::UnsupportedFormat(ref t) if t == tag));
        }
    }

    #[test]
    fn format_from_path_uses_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("cv/Jane.Docx")).unwrap(),
            DocumentFormat::Docx
        );
        assert!(DocumentFormat::from_path(Path::new("notes.txt")).is_err());
        assert!(DocumentFormat::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn extractors_report_their_format() {
        for format in DocumentFormat::ALL {
            assert_eq!(format.extractor().format(), format);
        }
    }

    #[test]
    fn unsupported_document_returns_error() {
        let err = extract_text(&doc("txt", b"plain".to_vec())).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn invalid_pdf_returns_error() {
        let err = extract_text(&doc("pdf", b"not a pdf".to_vec())).unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }

    #[test]
    fn invalid_zip_returns_error_for_docx() {
        let err = extract_text(&doc("docx", b"not a zip".to_vec())).unwrap_err();
        assert!(matches!(err, ExtractError::Docx(_)));
    }

    #[test]
    fn docx_without_body_returns_error() {
        let bytes = docx(&[("word/styles.xml", "<w:styles/>")]);
        let err = extract_text(&doc("docx", bytes)).unwrap_err();
        assert!(err.to_string().contains("word/document.xml not found"));
    }

    #[test]
    fn docx_paragraphs_and_runs() {
        let body = word_xml(
            "<w:p><w:r><w:t>Senior</w:t></w:r><w:r><w:t xml:space=\"preserve\"> Rust engineer</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Kafka</w:t><w:tab/><w:t>Postgres</w:t><w:br/><w:t>AT&amp;T</w:t></w:r></w:p>",
        );
        let bytes = docx(&[(DOCX_BODY, body.as_str())]);
        let text = extract_text(&doc("docx", bytes)).unwrap();
        assert_eq!(text.as_str(), "Senior Rust engineer\nKafka\tPostgres\nAT&T");
    }

    #[test]
    fn docx_headers_and_footers_wrap_body_in_order() {
        let bytes = docx(&[
            ("word/footer1.xml", word_xml("<w:p><w:r><w:t>footer one</w:t></w:r></w:p>").as_str()),
            (DOCX_BODY, word_xml("<w:p><w:r><w:t>body text</w:t></w:r></w:p>").as_str()),
            ("word/header10.xml", word_xml("<w:p><w:r><w:t>header ten</w:t></w:r></w:p>").as_str()),
            ("word/header2.xml", word_xml("<w:p><w:r><w:t>header two</w:t></w:r></w:p>").as_str()),
        ]);
        let text = extract_text(&doc("docx", bytes)).unwrap();
        assert_eq!(text.as_str(), "header two\nheader ten\nbody text\nfooter one");
    }

    #[test]
    fn docx_with_empty_body_is_empty_text() {
        let bytes = docx(&[(DOCX_BODY, word_xml("").as_str())]);
        let text = extract_text(&doc("docx", bytes)).unwrap();
        assert!(text.is_empty());
    }

    fn archive(bytes: &[u8]) -> zip::ZipArchive<std::io::Cursor<&[u8]>> {
        zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn oversized_zip_entry_is_rejected() {
        let bytes = docx(&[(DOCX_BODY, "<w:document>0123456789abcdef</w:document>")]);
        let err = read_zip_entry_bounded(&mut archive(&bytes), DOCX_BODY, 16).unwrap_err();
        assert!(matches!(err, ExtractError::Docx(_)));
        assert!(err.to_string().contains("exceeds size limit (16 bytes)"), "{err}");
    }

    #[test]
    fn zip_entry_at_the_limit_is_read() {
        let body = "0123456789abcdef";
        let bytes = docx(&[(DOCX_BODY, body)]);
        let read = read_zip_entry_bounded(&mut archive(&bytes), DOCX_BODY, 16).unwrap();
        assert_eq!(read, body.as_bytes());

        let err = read_zip_entry_bounded(&mut archive(&bytes), DOCX_BODY, 15).unwrap_err();
        assert!(err.to_string().contains("exceeds size limit (15 bytes)"), "{err}");
    }

    #[test]
    fn short_page_list_is_an_error() {
        let pages = vec!["one".to_string(), "two".to_string()];
        let err = ensure_all_pages(pages.clone(), 3).unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(ref m) if m == "extracted 2 of 3 pages"));
        assert_eq!(ensure_all_pages(pages, 2).unwrap().len(), 2);
    }

    #[test]
    fn supported_tags_list_every_format() {
        assert_eq!(DocumentFormat::supported_tags(), "pdf, docx");
        for format in DocumentFormat::ALL {
            assert!(DocumentFormat::supported_tags().contains(format.tag()));
        }
    }
}
