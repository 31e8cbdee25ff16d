pub mod extractor;
pub mod ocr;
pub mod pdf;
pub mod types;

pub use extractor::*;
pub use ocr::*;
pub use pdf::*;
pub use types::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to run tesseract (is it installed? path='{path}'): {reason}")]
    OcrUnavailable { path: String, reason: String },

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Unsupported file type. Please upload a PDF or image file (JPG, JPEG, PNG)")]
    UnsupportedFormat,
}
