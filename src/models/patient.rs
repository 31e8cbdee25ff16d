use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Form fields a result request must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "name", "age", "gender", "height", "weight", "diet", "activity", "smoke", "drink",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required field: {0}")]
pub struct MissingField(pub &'static str);

/// Patient details entered on the metadata form. Values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientMetadata {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub height: String,
    pub weight: String,
    pub diet: String,
    pub activity: String,
    pub smoke: String,
    pub drink: String,
}

impl PatientMetadata {
    /// Build from submitted form fields. Reports the first absent field in
    /// `REQUIRED_FIELDS` order. Present-but-empty values are accepted.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, MissingField> {
        let field = |key: &'static str| form.get(key).cloned().ok_or(MissingField(key));

        Ok(Self {
            name: field("name")?,
            age: field("age")?,
            gender: field("gender")?,
            height: field("height")?,
            weight: field("weight")?,
            diet: field("diet")?,
            activity: field("activity")?,
            smoke: field("smoke")?,
            drink: field("drink")?,
        })
    }

    /// Labelled lines for the "Patient Information" section of the report.
    pub fn report_lines(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Name", self.name.as_str()),
            ("Age", self.age.as_str()),
            ("Gender", self.gender.as_str()),
            ("Height", self.height.as_str()),
            ("Weight", self.weight.as_str()),
            ("Diet", self.diet.as_str()),
            ("Smoking", self.smoke.as_str()),
            ("Alcohol", self.drink.as_str()),
            ("Activity Level", self.activity.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_form() -> HashMap<String, String> {
        REQUIRED_FIELDS
            .iter()
            .map(|f| (f.to_string(), format!("{f}-value")))
            .collect()
    }

    #[test]
    fn complete_form_builds_metadata() {
        let patient = PatientMetadata::from_form(&full_form()).unwrap();
        assert_eq!(patient.name, "name-value");
        assert_eq!(patient.drink, "drink-value");
    }

    #[test]
    fn missing_field_is_named() {
        let mut form = full_form();
        form.remove("weight");
        let err = PatientMetadata::from_form(&form).unwrap_err();
        assert_eq!(err, MissingField("weight"));
        assert_eq!(err.to_string(), "Missing required field: weight");
    }

    #[test]
    fn first_missing_field_wins() {
        let mut form = full_form();
        form.remove("smoke");
        form.remove("age");
        assert_eq!(PatientMetadata::from_form(&form).unwrap_err(), MissingField("age"));
    }

    #[test]
    fn report_lines_follow_report_order() {
        let patient = PatientMetadata::from_form(&full_form()).unwrap();
        let labels: Vec<&str> = patient.report_lines().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec![
                "Name", "Age", "Gender", "Height", "Weight", "Diet", "Smoking", "Alcohol",
                "Activity Level"
            ]
        );
        assert_eq!(patient.report_lines()[7].1, "drink-value");
    }
}
