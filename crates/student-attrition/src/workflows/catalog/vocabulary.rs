use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::{MetricOptions, CATALOG_NAME};

/// Versions of the reference vocabulary. Stored records keep the revision they were seeded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyRevision {
    /// Lower-case yes/no, gender and attendance answers.
    Legacy,
    /// Title-case answers, as decoded by the prediction model.
    Current,
}

impl VocabularyRevision {
    pub const CURRENT: VocabularyRevision = VocabularyRevision::Current;

    pub const fn number(self) -> u8 {
        match self {
            VocabularyRevision::Legacy => 1,
            VocabularyRevision::Current => 2,
        }
    }
}

impl fmt::Display for VocabularyRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocabularyRevision::Legacy => f.write_str("legacy"),
            VocabularyRevision::Current => f.write_str("current"),
        }
    }
}

impl FromStr for VocabularyRevision {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" | "1" | "v1" => Ok(VocabularyRevision::Legacy),
            "current" | "2" | "v2" => Ok(VocabularyRevision::Current),
            other => Err(other.to_string()),
        }
    }
}

const MARITAL_STATUS: &[&str] = &[
    "Single",
    "Married",
    "Widower",
    "Divorced",
    "Facto union",
    "Legally separated",
];

const APPLICATION_MODE: &[&str] = &[
    "1st phase—general contingent",
    "Ordinance No. 612/93",
    "1st phase—special contingent (Azores Island)",
    "Holders of other higher courses",
    "Ordinance No. 854-B/99",
    "International student (bachelor)",
    "1st phase—special contingent (Madeira Island)",
    "2nd phase—general contingent",
    "3rd phase—general contingent",
    "Ordinance No. 533-A/99, item b2) (Different Plan)",
    "Ordinance No. 533-A/99, item b3 (Other Institution)",
    "Over 23 years old",
    "Transfer",
    "Change in course",
    "Technological specialization diploma holders",
    "Change in institution/course",
    "Short cycle diploma holders",
    "Change in institution/course (International)",
];

const COURSE: &[&str] = &[
    "Biofuel Production Technologies",
    "Animation and Multimedia Design",
    "Social Service (evening attendance)",
    "Agronomy",
    "Communication Design",
    "Veterinary Nursing",
    "Informatics Engineering",
    "Equiniculture",
    "Management",
    "Social Service",
    "Tourism",
    "Nursing",
    "Oral Hygiene",
    "Advertising and Marketing Management",
    "Journalism and Communication",
    "Basic Education",
    "Management (evening attendance)",
];

const ATTENDANCE_TYPE: &[&str] = &["Evening", "Daytime"];

const PREVIOUS_QUALIFICATION: &[&str] = &[
    "Secondary education",
    "Higher education—bachelor’s degree",
    "Higher education—degree",
    "Higher education—master’s degree",
    "Higher education—doctorate",
    "Frequency of higher education",
    "12th year of schooling—not completed",
    "11th year of schooling—not completed",
    "Other—11th year of schooling",
    "10th year of schooling",
    "10th year of schooling—not completed",
    "Basic education 3rd cycle (9th/10th/11th year) or equivalent",
    "Basic education 2nd cycle (6th/7th/8th year) or equivalent",
    "Technological specialization course",
    "Higher education—degree (1st cycle)",
    "Professional higher technical course",
    "Higher education—master’s degree (2nd cycle)",
];

const NATIONALITY: &[&str] = &[
    "Portuguese",
    "German",
    "Spanish",
    "Italian",
    "Dutch",
    "English",
    "Lithuanian",
    "Angolan",
    "Cape Verdean",
    "Guinean",
    "Mozambican",
    "Santomean",
    "Turkish",
    "Brazilian",
    "Romanian",
    "Moldova (Republic of)",
    "Mexican",
    "Ukrainian",
    "Russian",
    "Cuban",
    "Colombian",
];

const PARENTAL_QUALIFICATION: &[&str] = &[
    "Unknown",
    "Basic-level",
    "Lower-level",
    "Technical",
    "Higher-level",
];

const PARENTAL_OCCUPATION: &[&str] = &[
    "Unskilled",
    "Unknown",
    "Technical",
    "Healthcare",
    "Military",
    "Administration",
    "Leadership",
    "Academic",
];

const BINARY: &[&str] = &["Yes", "No"];

const GENDER: &[&str] = &["Female", "Male"];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn cased(values: &[&str], revision: VocabularyRevision) -> Vec<String> {
    match revision {
        VocabularyRevision::Legacy => values.iter().map(|value| value.to_lowercase()).collect(),
        VocabularyRevision::Current => owned(values),
    }
}

/// Hard-coded vocabulary the catalog is seeded from.
pub fn reference_options(revision: VocabularyRevision) -> MetricOptions {
    MetricOptions {
        name: CATALOG_NAME.to_string(),
        revision,
        marital_status: owned(MARITAL_STATUS),
        application_mode: owned(APPLICATION_MODE),
        course: owned(COURSE),
        attendance_type: cased(ATTENDANCE_TYPE, revision),
        previous_qualification: owned(PREVIOUS_QUALIFICATION),
        nationality: owned(NATIONALITY),
        parental_qualification: owned(PARENTAL_QUALIFICATION),
        parental_occupation: owned(PARENTAL_OCCUPATION),
        binary: cased(BINARY, revision),
        gender: cased(GENDER, revision),
        created_at: Utc::now(),
    }
}
