use serde::{Deserialize, Serialize};

use super::enums::BiomarkerStatus;

/// A single lab measurement shown on the result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biomarker {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub reference_range: String,
    pub status: BiomarkerStatus,
    pub nutrition_recommendation: Option<String>,
    pub fitness_recommendation: Option<String>,
}

impl Biomarker {
    pub fn new(name: &str, value: f64, unit: &str, reference_range: &str, status: BiomarkerStatus) -> Self {
        Self {
            name: name.to_string(),
            value,
            unit: unit.to_string(),
            reference_range: reference_range.to_string(),
            status,
            nutrition_recommendation: None,
            fitness_recommendation: None,
        }
    }

    pub fn with_recommendations(mut self, nutrition: &str, fitness: &str) -> Self {
        self.nutrition_recommendation = Some(nutrition.to_string());
        self.fitness_recommendation = Some(fitness.to_string());
        self
    }

    pub fn has_recommendations(&self) -> bool {
        self.nutrition_recommendation.is_some() || self.fitness_recommendation.is_some()
    }

    /// Value with its unit, dropping a trailing `.0` for whole numbers.
    pub fn display_value(&self) -> String {
        if self.value.fract() == 0.0 {
            format!("{} {}", self.value as i64, self.unit)
        } else {
            format!("{} {}", self.value, self.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_value_formats_whole_numbers() {
        let b = Biomarker::new("HDL Cholesterol", 55.0, "mg/dL", "> 40 mg/dL", BiomarkerStatus::Normal);
        assert_eq!(b.display_value(), "55 mg/dL");
        assert!(!b.has_recommendations());
    }

    #[test]
    fn display_value_keeps_fractions() {
        let b = Biomarker::new("HbA1c", 5.7, "%", "< 5.7 %", BiomarkerStatus::Moderate);
        assert_eq!(b.display_value(), "5.7 %");
    }

    #[test]
    fn recommendations_are_attached() {
        let b = Biomarker::new("LDL", 165.0, "mg/dL", "< 130 mg/dL", BiomarkerStatus::Critical)
            .with_recommendations("Eat fiber.", "Walk daily.");
        assert!(b.has_recommendations());
        assert_eq!(b.fitness_recommendation.as_deref(), Some("Walk daily."));
    }
}
