use std::path::Path;
use std::sync::Arc;

use super::pdf::PdfTextExtractor;
use super::types::{ExtractedText, ExtractionMethod, OcrEngine, PdfExtractor};
use super::ExtractionError;

/// Extensions routed to image OCR.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Turns a stored report file into text.
///
/// `extract_text_from_file` is the upload path and only handles images.
/// `extract_document_text` is the older entry point that also reads the
/// text layer of digital PDFs.
#[derive(Clone)]
pub struct TextExtractor {
    ocr: Arc<dyn OcrEngine>,
    pdf: Arc<dyn PdfExtractor>,
}

impl TextExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self {
            ocr,
            pdf: Arc::new(PdfTextExtractor),
        }
    }

    /// OCR an uploaded report image. The text may be empty; callers decide
    /// whether that is an error.
    pub fn extract_text_from_file(&self, path: &Path) -> Result<ExtractedText, ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::NotFound(path.to_path_buf()));
        }

        match lowercase_extension(path).as_deref() {
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => self.extract_from_image(path),
            _ => Err(ExtractionError::UnsupportedFormat),
        }
    }

    /// Legacy dispatcher: images go through OCR, `.pdf` through the PDF
    /// text layer.
    pub fn extract_document_text(&self, path: &Path) -> Result<ExtractedText, ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::NotFound(path.to_path_buf()));
        }

        match lowercase_extension(path).as_deref() {
            Some("pdf") => {
                let bytes = std::fs::read(path)?;
                let text = self.pdf.extract_text(&bytes)?;
                Ok(ExtractedText::new(&text, ExtractionMethod::PdfDirect))
            }
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => self.extract_from_image(path),
            _ => Err(ExtractionError::UnsupportedFormat),
        }
    }

    fn extract_from_image(&self, path: &Path) -> Result<ExtractedText, ExtractionError> {
        // Format is sniffed from content, not the extension.
        let image = image::ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| ExtractionError::ImageProcessing(e.to_string()))?;
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Running OCR on report image"
        );

        let raw = self.ocr.ocr_image(path)?;
        Ok(ExtractedText::new(&raw, ExtractionMethod::TesseractOcr))
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
