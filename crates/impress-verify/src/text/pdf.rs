//! PDF text extraction with pdfium-render

use pdfium_render::prelude::*;

use super::{TextExtractionError, TextExtractor};

impl From<PdfiumError> for TextExtractionError {
    fn from(e: PdfiumError) -> Self {
        TextExtractionError::PdfLoad(e.to_string())
    }
}

/// Extracts the text of every page, joined by newlines
///
/// Binds to the system pdfium library on each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, TextExtractionError> {
        let bindings = Pdfium::bind_to_system_library()
            .map_err(|e| TextExtractionError::Unsupported(e.to_string()))?;
        let pdfium = Pdfium::new(bindings);
        extract_with_pdfium(&pdfium, bytes)
    }
}

fn extract_with_pdfium(pdfium: &Pdfium, bytes: &[u8]) -> Result<String, TextExtractionError> {
    let document = pdfium.load_pdf_from_byte_slice(bytes, None)?;

    let mut full_text = String::new();
    for page in document.pages().iter() {
        let text = page
            .text()
            .map_err(|e| TextExtractionError::Extraction(e.to_string()))?;

        if !full_text.is_empty() {
            full_text.push('\n');
        }
        full_text.push_str(&text.all());
    }

    if full_text.trim().is_empty() {
        return Err(TextExtractionError::Empty);
    }
    Ok(full_text)
}
