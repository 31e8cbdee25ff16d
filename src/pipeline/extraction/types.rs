use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// How text was extracted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExtractionMethod {
    TesseractOcr,
    PdfDirect,
}

/// Trimmed text pulled out of a stored report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub method: ExtractionMethod,
}

impl ExtractedText {
    pub fn new(raw: &str, method: ExtractionMethod) -> Self {
        Self {
            text: raw.trim().to_string(),
            method,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// OCR engine abstraction (allows mocking for tests)
pub trait OcrEngine: Send + Sync {
    fn ocr_image(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// PDF text extraction abstraction
pub trait PdfExtractor: Send + Sync {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String, ExtractionError>;
}
