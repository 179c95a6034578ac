use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::vocabulary::VocabularyRevision;

/// Unique name of the single catalog record.
pub const CATALOG_NAME: &str = "performanceMetricOptions";

/// Allowed answers for every categorical form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricOptions {
    pub name: String,
    pub revision: VocabularyRevision,
    pub marital_status: Vec<String>,
    pub application_mode: Vec<String>,
    pub course: Vec<String>,
    pub attendance_type: Vec<String>,
    pub previous_qualification: Vec<String>,
    pub nationality: Vec<String>,
    pub parental_qualification: Vec<String>,
    pub parental_occupation: Vec<String>,
    pub binary: Vec<String>,
    pub gender: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl MetricOptions {
    pub fn list(&self, category: OptionCategory) -> &[String] {
        match category {
            OptionCategory::MaritalStatus => &self.marital_status,
            OptionCategory::ApplicationMode => &self.application_mode,
            OptionCategory::Course => &self.course,
            OptionCategory::AttendanceType => &self.attendance_type,
            OptionCategory::PreviousQualification => &self.previous_qualification,
            OptionCategory::Nationality => &self.nationality,
            OptionCategory::ParentalQualification => &self.parental_qualification,
            OptionCategory::ParentalOccupation => &self.parental_occupation,
            OptionCategory::Binary => &self.binary,
            OptionCategory::Gender => &self.gender,
        }
    }

    fn list_mut(&mut self, category: OptionCategory) -> &mut Vec<String> {
        match category {
            OptionCategory::MaritalStatus => &mut self.marital_status,
            OptionCategory::ApplicationMode => &mut self.application_mode,
            OptionCategory::Course => &mut self.course,
            OptionCategory::AttendanceType => &mut self.attendance_type,
            OptionCategory::PreviousQualification => &mut self.previous_qualification,
            OptionCategory::Nationality => &mut self.nationality,
            OptionCategory::ParentalQualification => &mut self.parental_qualification,
            OptionCategory::ParentalOccupation => &mut self.parental_occupation,
            OptionCategory::Binary => &mut self.binary,
            OptionCategory::Gender => &mut self.gender,
        }
    }

    /// Copy with every list ordered alphabetically, ignoring case.
    pub fn sorted(&self) -> MetricOptions {
        let mut sorted = self.clone();
        for category in OptionCategory::ALL {
            sorted
                .list_mut(category)
                .sort_by_key(|value| value.to_lowercase());
        }
        sorted
    }
}

/// The vocabulary lists a form can ask for individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionCategory {
    MaritalStatus,
    ApplicationMode,
    Course,
    AttendanceType,
    PreviousQualification,
    Nationality,
    ParentalQualification,
    ParentalOccupation,
    Binary,
    Gender,
}

impl OptionCategory {
    pub const ALL: [OptionCategory; 10] = [
        OptionCategory::MaritalStatus,
        OptionCategory::ApplicationMode,
        OptionCategory::Course,
        OptionCategory::AttendanceType,
        OptionCategory::PreviousQualification,
        OptionCategory::Nationality,
        OptionCategory::ParentalQualification,
        OptionCategory::ParentalOccupation,
        OptionCategory::Binary,
        OptionCategory::Gender,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            OptionCategory::MaritalStatus => "marital_status",
            OptionCategory::ApplicationMode => "application_mode",
            OptionCategory::Course => "course",
            OptionCategory::AttendanceType => "attendance_type",
            OptionCategory::PreviousQualification => "previous_qualification",
            OptionCategory::Nationality => "nationality",
            OptionCategory::ParentalQualification => "parental_qualification",
            OptionCategory::ParentalOccupation => "parental_occupation",
            OptionCategory::Binary => "binary",
            OptionCategory::Gender => "gender",
        }
    }
}

impl fmt::Display for OptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for OptionCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        OptionCategory::ALL
            .into_iter()
            .find(|category| category.slug() == normalized)
            .ok_or_else(|| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::catalog::vocabulary::reference_options;

    #[test]
    fn sorted_orders_lists_case_insensitively() {
        let mut options = reference_options(VocabularyRevision::Current);
        options.binary = vec!["yes".to_string(), "No".to_string(), "maybe".to_string()];

        let sorted = options.sorted();

        assert_eq!(sorted.binary, vec!["maybe", "No", "yes"]);
        assert_eq!(sorted.attendance_type, vec!["Daytime", "Evening"]);
        assert_eq!(options.attendance_type, vec!["Evening", "Daytime"]);
    }

    #[test]
    fn categories_parse_from_slugs() {
        assert_eq!(
            "parental-occupation".parse::<OptionCategory>(),
            Ok(OptionCategory::ParentalOccupation)
        );
        assert!("shoe_size".parse::<OptionCategory>().is_err());
    }

    #[test]
    fn serializes_with_snake_case_keys() {
        let options = reference_options(VocabularyRevision::Current);
        let json = serde_json::to_value(&options).expect("serializes");
        assert_eq!(json["name"], CATALOG_NAME);
        assert_eq!(json["revision"], "current");
        assert_eq!(json["marital_status"][0], "Single");
        assert!(json.get("created_at").is_some());
    }
}
