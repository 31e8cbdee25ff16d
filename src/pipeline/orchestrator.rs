//! Upload → text → report pipeline for a single result request.
//!
//! Steps run strictly in order and the first failure ends the request:
//! containment check, existence check, OCR, PDF rendering, biomarker
//! lookup. Nothing is retried.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::biomarkers::BiomarkerProvider;
use super::extraction::{ExtractionError, TextExtractor};
use super::report::{RenderError, ReportRenderer};
use crate::models::{Biomarker, PatientMetadata};
use crate::paths::{resolve_within, PathError, UploadBoundary};

/// Narrative used in place of a generated analysis.
pub const BASIC_ANALYSIS: &str = "Basic report generated without GPT.";

pub const NO_TEXT_MESSAGE: &str =
    "No text could be extracted from the report. Please ensure the file is clear and readable.";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    #[error("File not found")]
    NotFound,

    #[error("{}", NO_TEXT_MESSAGE)]
    NoText,

    #[error("Error extracting text from report: {0}")]
    Extraction(#[source] ExtractionError),

    #[error("Error generating PDF report: {0}")]
    Rendering(String),
}

impl From<PathError> for PipelineError {
    fn from(err: PathError) -> Self {
        PipelineError::Forbidden(err.to_string())
    }
}

impl From<ExtractionError> for PipelineError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::NotFound(_) => PipelineError::NotFound,
            other => PipelineError::Extraction(other),
        }
    }
}

impl From<RenderError> for PipelineError {
    fn from(err: RenderError) -> Self {
        PipelineError::Rendering(err.to_string())
    }
}

/// Everything the result page needs.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    pub patient: PatientMetadata,
    pub report_text: String,
    pub analysis: String,
    pub report_path: PathBuf,
    pub biomarkers: Vec<Biomarker>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ReportPipeline {
    uploads: UploadBoundary,
    extractor: TextExtractor,
    renderer: Arc<dyn ReportRenderer>,
    biomarkers: Arc<dyn BiomarkerProvider>,
}

impl ReportPipeline {
    pub fn new(
        uploads: UploadBoundary,
        extractor: TextExtractor,
        renderer: Arc<dyn ReportRenderer>,
        biomarkers: Arc<dyn BiomarkerProvider>,
    ) -> Self {
        Self {
            uploads,
            extractor,
            renderer,
            biomarkers,
        }
    }

    /// Boundary that every uploaded file must resolve inside.
    pub fn uploads(&self) -> &UploadBoundary {
        &self.uploads
    }

    /// Run the full pipeline for one uploaded report.
    pub fn run(&self, file_path: &Path, patient: PatientMetadata) -> Result<ReportOutcome, PipelineError> {
        let resolved = resolve_within(&self.uploads, file_path).map_err(|e| {
            tracing::error!(path = %file_path.display(), "Attempted path traversal");
            PipelineError::from(e)
        })?;

        if !resolved.is_file() {
            tracing::error!(path = %file_path.display(), "File not found");
            return Err(PipelineError::NotFound);
        }

        tracing::info!(patient = %patient.name, "Starting OCR text extraction");
        let extracted = self.extractor.extract_text_from_file(&resolved).map_err(|e| {
            tracing::error!(error = %e, "Error in OCR processing");
            PipelineError::from(e)
        })?;
        if extracted.is_empty() {
            tracing::warn!(path = %file_path.display(), "No text extracted from report");
            return Err(PipelineError::NoText);
        }
        tracing::info!(chars = extracted.text.len(), "OCR text extraction completed");

        let analysis = BASIC_ANALYSIS.to_string();

        tracing::info!("Starting PDF generation");
        let report_path = self.renderer.render(&patient, &analysis).map_err(|e| {
            tracing::error!(error = %e, "Error in PDF generation");
            PipelineError::from(e)
        })?;
        if !report_path.exists() {
            tracing::error!(path = %report_path.display(), "PDF generation produced no file");
            return Err(PipelineError::Rendering("no output file was produced".into()));
        }

        Ok(ReportOutcome {
            patient,
            report_text: extracted.text,
            analysis,
            report_path,
            biomarkers: self.biomarkers.biomarkers(),
            generated_at: Utc::now(),
        })
    }
}
