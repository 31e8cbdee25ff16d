//! Biomarker data shown next to the report.
//!
//! Values are demonstration data and are not read from the OCR text.

use crate::models::{Biomarker, BiomarkerStatus};

/// Source of the biomarker cards on the result page.
pub trait BiomarkerProvider: Send + Sync {
    fn biomarkers(&self) -> Vec<Biomarker>;
}

/// The fixed lipid and glucose panel used for demonstration.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleBiomarkers;

impl BiomarkerProvider for SampleBiomarkers {
    fn biomarkers(&self) -> Vec<Biomarker> {
        vec![
            Biomarker::new("LDL Cholesterol", 165.0, "mg/dL", "< 130 mg/dL", BiomarkerStatus::Critical)
                .with_recommendations(
                    "Reduce saturated fats, increase fiber intake with whole grains and legumes.",
                    "30 minutes of moderate aerobic exercise 5 times per week.",
                ),
            Biomarker::new("HDL Cholesterol", 55.0, "mg/dL", "> 40 mg/dL", BiomarkerStatus::Normal),
            Biomarker::new("Triglycerides", 180.0, "mg/dL", "< 150 mg/dL", BiomarkerStatus::Moderate),
            Biomarker::new("Fasting Blood Sugar", 170.0, "mg/dL", "70-100 mg/dL", BiomarkerStatus::Critical)
                .with_recommendations(
                    "Limit simple carbs, increase protein and healthy fats.",
                    "Include both cardio and strength training to improve insulin sensitivity.",
                ),
        ]
    }
}

/// Provider returning a caller-supplied list.
#[derive(Debug, Clone, Default)]
pub struct StaticBiomarkers(pub Vec<Biomarker>);

impl BiomarkerProvider for StaticBiomarkers {
    fn biomarkers(&self) -> Vec<Biomarker> {
        self.0.clone()
    }
}
