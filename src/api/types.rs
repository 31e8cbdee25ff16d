//! Shared state for the HTTP layer.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::paths::{open_boundary, PathError, ReportBoundary, UploadBoundary};
use crate::pipeline::extraction::{TesseractCli, TextExtractor};
use crate::pipeline::{PdfReportRenderer, ReportPipeline, SampleBiomarkers};
use crate::upload::UploadPolicy;

/// Context handed to every handler. Cheap to clone; everything inside is
/// read-only after startup.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub policy: Arc<UploadPolicy>,
    pub pipeline: ReportPipeline,
    pub reports: ReportBoundary,
}

impl AppContext {
    /// Production wiring: tesseract OCR, `printpdf` reports into the temp
    /// directory and the sample biomarker panel. Both directories are
    /// created if missing.
    pub fn new(config: AppConfig) -> Result<Self, PathError> {
        let ocr = TesseractCli::new(&config.tesseract_path).with_language(&config.ocr_language);
        let pipeline = ReportPipeline::new(
            open_boundary(&config.upload_dir)?,
            TextExtractor::new(Arc::new(ocr)),
            Arc::new(PdfReportRenderer::new(config.temp_dir.clone())),
            Arc::new(SampleBiomarkers),
        );
        Self::with_pipeline(config, pipeline)
    }

    pub fn with_pipeline(config: AppConfig, pipeline: ReportPipeline) -> Result<Self, PathError> {
        Ok(Self {
            policy: Arc::new(UploadPolicy::from_config(&config)),
            reports: open_boundary(&config.temp_dir)?,
            config: Arc::new(config),
            pipeline,
        })
    }

    pub fn uploads(&self) -> &UploadBoundary {
        self.pipeline.uploads()
    }

    pub fn upload_dir(&self) -> &Path {
        &self.config.upload_dir
    }
}

/// `POST /upload` success body.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_path: String,
}

/// `GET /form` query.
#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
    pub file_path: Option<String>,
}

/// `GET /download_report` query.
#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    pub path: Option<String>,
}
