//! Domain records shared by the pipeline and the HTTP layer.

pub mod biomarker;
pub mod enums;
pub mod patient;

pub use biomarker::Biomarker;
pub use enums::BiomarkerStatus;
pub use patient::{MissingField, PatientMetadata, REQUIRED_FIELDS};
