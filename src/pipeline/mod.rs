//! Report pipeline: text extraction, PDF rendering, biomarker data and the
//! orchestrator that runs them in sequence.

pub mod biomarkers;
pub mod extraction;
pub mod orchestrator;
pub mod report;

pub use biomarkers::{BiomarkerProvider, SampleBiomarkers};
pub use orchestrator::{PipelineError, ReportOutcome, ReportPipeline};
pub use report::{PdfReportRenderer, ReportRenderer};
