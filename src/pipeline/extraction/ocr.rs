use std::path::Path;
use std::process::Command;

use super::types::OcrEngine;
use super::ExtractionError;

/// Tesseract invoked as an external process: `tesseract <image> stdout -l <lang>`.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    tesseract_path: String,
    language: String,
}

impl TesseractCli {
    pub fn new(tesseract_path: &str) -> Self {
        Self {
            tesseract_path: tesseract_path.to_string(),
            language: crate::config::DEFAULT_OCR_LANGUAGE.to_string(),
        }
    }

    /// Set language(s) for OCR (e.g., "eng", "eng+fra")
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }
}

impl OcrEngine for TesseractCli {
    fn ocr_image(&self, path: &Path) -> Result<String, ExtractionError> {
        let output = Command::new(&self.tesseract_path)
            .arg(path.as_os_str())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| ExtractionError::OcrUnavailable {
                path: self.tesseract_path.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::OcrProcessing(format!(
                "tesseract exited with code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Check if Tesseract is available on the system.
pub fn is_tesseract_available(tesseract_path: &str) -> bool {
    Command::new(tesseract_path)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Mock OCR engine for unit testing without Tesseract.
pub struct MockOcrEngine {
    pub result: Result<String, String>,
}

impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, _path: &Path) -> Result<String, ExtractionError> {
        self.result
            .clone()
            .map_err(ExtractionError::OcrProcessing)
    }
}
