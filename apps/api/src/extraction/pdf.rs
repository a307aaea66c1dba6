use super::{ExtractionError, TextExtractor};

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with an embedded text layer; scanned pages yield no text.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
    }
}
