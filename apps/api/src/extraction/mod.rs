//! Text extraction from uploaded resume documents.
//!
//! Parsing itself belongs to external libraries: `pdf-extract` for PDF and the
//! `zip` plus `quick-xml` for DOCX. This module only picks the
//! right backend, keeps library panics contained, and normalizes the output.

pub mod docx;
pub mod pdf;

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use bytes::Bytes;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

pub use docx::DocxTextExtractor;
pub use pdf::PdfTextExtractor;

/// Matches the default upload limit.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("{0}")]
    UnsupportedType(String),

    #[error("PDF parsing failed: {0}")]
    Pdf(String),

    #[error("DOCX parsing failed: {0}")]
    Docx(String),

    #[error("Document parser crashed: {0}")]
    Panicked(String),
}

/// The document formats the screener can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detects the format from the declared MIME type, falling back to the
    /// filename extension. Returns `None` for anything else.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let mime = content_type.map(|m| m.trim().to_ascii_lowercase());
        let name = file_name.map(|n| n.trim().to_ascii_lowercase());

        let mime_is = |expected: &str| mime.as_deref() == Some(expected);
        let ext_is = |ext: &str| name.as_deref().is_some_and(|n| n.ends_with(ext));

        if mime_is(PDF_MIME) || ext_is(".pdf") {
            Some(DocumentKind::Pdf)
        } else if mime_is(DOCX_MIME) || ext_is(".docx") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

/// A single uploaded file. Lives only for the duration of one parse request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn kind(&self) -> Result<DocumentKind, ExtractionError> {
        DocumentKind::detect(self.content_type.as_deref(), self.file_name.as_deref()).ok_or_else(
            || {
                ExtractionError::UnsupportedType(
                    self.file_name
                        .clone()
                        .or_else(|| self.content_type.clone())
                        .unwrap_or_else(|| "unknown".to_string()),
                )
            },
        )
    }
}

/// Synchronous, format-specific backend. Returns raw (un-normalized) text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// The extractor seam held in `AppState`. Swapped for fakes in handler tests.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(&self, kind: DocumentKind, bytes: Bytes) -> Result<String, ExtractionError>;
}

/// Default extractor: dispatches to the library backends on the blocking pool.
#[derive(Clone)]
pub struct LibraryExtractor {
    pdf: Arc<dyn TextExtractor>,
    docx: Arc<dyn TextExtractor>,
}

impl LibraryExtractor {
    /// `max_document_bytes` caps how far a compressed container may inflate.
    pub fn new(max_document_bytes: usize) -> Self {
        Self::with_backends(
            Arc::new(PdfTextExtractor),
            Arc::new(DocxTextExtractor::new(max_document_bytes)),
        )
    }

    pub fn with_backends(pdf: Arc<dyn TextExtractor>, docx: Arc<dyn TextExtractor>) -> Self {
        Self { pdf, docx }
    }
}

impl Default for LibraryExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DOCUMENT_BYTES)
    }
}

#[async_trait]
impl DocumentExtractor for LibraryExtractor {
    async fn extract(&self, kind: DocumentKind, bytes: Bytes) -> Result<String, ExtractionError> {
        let backend = match kind {
            DocumentKind::Pdf => Arc::clone(&self.pdf),
            DocumentKind::Docx => Arc::clone(&self.docx),
        };

        let raw = tokio::task::spawn_blocking(move || backend.extract_text(&bytes))
            .await
            .map_err(|e| ExtractionError::Panicked(e.to_string()))??;

        let text = normalize_text(&raw);
        debug!(
            "Extracted {} chars from {} document",
            text.len(),
            kind.as_str()
        );
        Ok(text)
    }
}

static SPACE_BEFORE_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\n").expect("valid regex"));

/// NULs become spaces, whitespace runs ending in a newline collapse to that
/// newline, and the ends are trimmed.
pub fn normalize_text(raw: &str) -> String {
    let without_nuls = raw.replace('\u{0000}', " ");
    SPACE_BEFORE_NEWLINE
        .replace_all(&without_nuls, "\n")
        .trim()
        .to_string()
}
