//! Text extraction from uploaded documents
//!
//! The pipeline only needs plain text to scan for identifiers. How bytes
//! become text is a collaborator behind [`TextExtractor`].

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "pdf")]
pub use pdf::*;

use thiserror::Error;

/// Error type for text extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextExtractionError {
    #[error("Document is empty")]
    Empty,
    #[error("Document is not valid UTF-8 text: {0}")]
    InvalidEncoding(String),
    #[error("Failed to load PDF: {0}")]
    PdfLoad(String),
    #[error("Failed to extract text: {0}")]
    Extraction(String),
    #[error("PDF support is not available: {0}")]
    Unsupported(String),
}

/// Converts a raw document buffer to plain text
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, TextExtractionError>;
}

/// Treats the document as UTF-8 text
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8TextExtractor;

impl TextExtractor for Utf8TextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, TextExtractionError> {
        if bytes.is_empty() {
            return Err(TextExtractionError::Empty);
        }
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| TextExtractionError::InvalidEncoding(e.to_string()))
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";

pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Default extractor: PDFs go through pdfium when built with the `pdf`
/// feature, everything else is read as UTF-8
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextExtractor;

impl TextExtractor for DocumentTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, TextExtractionError> {
        if is_pdf(bytes) {
            return extract_pdf(bytes);
        }
        Utf8TextExtractor.extract_text(bytes)
    }
}

#[cfg(feature = "pdf")]
fn extract_pdf(bytes: &[u8]) -> Result<String, TextExtractionError> {
    PdfTextExtractor.extract_text(bytes)
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(_bytes: &[u8]) -> Result<String, TextExtractionError> {
    Err(TextExtractionError::Unsupported(
        "built without the `pdf` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_extractor() {
        let text = Utf8TextExtractor.extract_text(b"DOI: 10.1234/abcd").unwrap();
        assert_eq!(text, "DOI: 10.1234/abcd");
    }

    #[test]
    fn test_utf8_extractor_rejects_empty() {
        assert_eq!(
            Utf8TextExtractor.extract_text(b""),
            Err(TextExtractionError::Empty)
        );
    }

    #[test]
    fn test_utf8_extractor_rejects_binary() {
        let err = Utf8TextExtractor.extract_text(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, TextExtractionError::InvalidEncoding(_)));
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(b"%PDF-1.7\n..."));
        assert!(!is_pdf(b"plain text"));
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn test_pdf_without_feature_is_unsupported() {
        let err = DocumentTextExtractor.extract_text(b"%PDF-1.4\n").unwrap_err();
        assert!(matches!(err, TextExtractionError::Unsupported(_)));
    }

    #[test]
    fn test_document_extractor_reads_text() {
        let text = DocumentTextExtractor.extract_text(b"ISSN 0028-0836").unwrap();
        assert_eq!(text, "ISSN 0028-0836");
    }
}
