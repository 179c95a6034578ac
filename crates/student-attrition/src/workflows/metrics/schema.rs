use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::MetricError;

/// Every answer collected by the performance metric form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricField {
    MaritalStatus,
    ApplicationMode,
    ApplicationOrder,
    Course,
    AttendanceType,
    PreviousQualification,
    Nationality,
    MothersQualification,
    FathersQualification,
    MothersOccupation,
    FathersOccupation,
    Displaced,
    EducationalSpecialNeeds,
    Debtor,
    TuitionFeesUpToDate,
    Gender,
    ScholarshipHolder,
    AgeAtEnrolment,
    International,
    FirstSemesterCredited,
    FirstSemesterEnrolled,
    FirstSemesterEvaluations,
    FirstSemesterApproved,
    FirstSemesterGrade,
    FirstSemesterWithoutEvaluations,
    SecondSemesterCredited,
    SecondSemesterEnrolled,
    SecondSemesterEvaluations,
    SecondSemesterApproved,
    SecondSemesterGrade,
    SecondSemesterWithoutEvaluations,
    UnemploymentRate,
    InflationRate,
    Gdp,
}

/// How a field is transmitted to the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Categorical,
}

impl MetricField {
    pub const ALL: [MetricField; 34] = [
        MetricField::MaritalStatus,
        MetricField::ApplicationMode,
        MetricField::ApplicationOrder,
        MetricField::Course,
        MetricField::AttendanceType,
        MetricField::PreviousQualification,
        MetricField::Nationality,
        MetricField::MothersQualification,
        MetricField::FathersQualification,
        MetricField::MothersOccupation,
        MetricField::FathersOccupation,
        MetricField::Displaced,
        MetricField::EducationalSpecialNeeds,
        MetricField::Debtor,
        MetricField::TuitionFeesUpToDate,
        MetricField::Gender,
        MetricField::ScholarshipHolder,
        MetricField::AgeAtEnrolment,
        MetricField::International,
        MetricField::FirstSemesterCredited,
        MetricField::FirstSemesterEnrolled,
        MetricField::FirstSemesterEvaluations,
        MetricField::FirstSemesterApproved,
        MetricField::FirstSemesterGrade,
        MetricField::FirstSemesterWithoutEvaluations,
        MetricField::SecondSemesterCredited,
        MetricField::SecondSemesterEnrolled,
        MetricField::SecondSemesterEvaluations,
        MetricField::SecondSemesterApproved,
        MetricField::SecondSemesterGrade,
        MetricField::SecondSemesterWithoutEvaluations,
        MetricField::UnemploymentRate,
        MetricField::InflationRate,
        MetricField::Gdp,
    ];

    /// Wire name shared by the form, the API and the prediction service.
    pub const fn name(self) -> &'static str {
        match self {
            MetricField::MaritalStatus => "marital_status",
            MetricField::ApplicationMode => "application_mode",
            MetricField::ApplicationOrder => "application_order",
            MetricField::Course => "course",
            MetricField::AttendanceType => "attendance_type",
            MetricField::PreviousQualification => "previous_qualification",
            MetricField::Nationality => "nationality",
            MetricField::MothersQualification => "mothers_qualification",
            MetricField::FathersQualification => "fathers_qualification",
            MetricField::MothersOccupation => "mothers_occupation",
            MetricField::FathersOccupation => "fathers_occupation",
            MetricField::Displaced => "displaced",
            MetricField::EducationalSpecialNeeds => "educational_special_needs",
            MetricField::Debtor => "debtor",
            MetricField::TuitionFeesUpToDate => "tuition_fees_up_to_date",
            MetricField::Gender => "gender",
            MetricField::ScholarshipHolder => "scholarship_holder",
            MetricField::AgeAtEnrolment => "age_at_enrolment",
            MetricField::International => "international",
            MetricField::FirstSemesterCredited => "curricular_units_1st_semester_credited",
            MetricField::FirstSemesterEnrolled => "curricular_units_1st_semester_enrolled",
            MetricField::FirstSemesterEvaluations => "curricular_units_1st_semester_evaluations",
            MetricField::FirstSemesterApproved => "curricular_units_1st_semester_approved",
            MetricField::FirstSemesterGrade => "curricular_units_1st_semester_grade",
            MetricField::FirstSemesterWithoutEvaluations => {
                "curricular_units_1st_semester_without_evaluations"
            }
            MetricField::SecondSemesterCredited => "curricular_units_2nd_semester_credited",
            MetricField::SecondSemesterEnrolled => "curricular_units_2nd_semester_enrolled",
            MetricField::SecondSemesterEvaluations => "curricular_units_2nd_semester_evaluations",
            MetricField::SecondSemesterApproved => "curricular_units_2nd_semester_approved",
            MetricField::SecondSemesterGrade => "curricular_units_2nd_semester_grade",
            MetricField::SecondSemesterWithoutEvaluations => {
                "curricular_units_2nd_semester_without_evaluations"
            }
            MetricField::UnemploymentRate => "unemployment_rate",
            MetricField::InflationRate => "inflation_rate",
            MetricField::Gdp => "gdp",
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            MetricField::ApplicationOrder
            | MetricField::AgeAtEnrolment
            | MetricField::FirstSemesterCredited
            | MetricField::FirstSemesterEnrolled
            | MetricField::FirstSemesterEvaluations
            | MetricField::FirstSemesterApproved
            | MetricField::FirstSemesterGrade
            | MetricField::FirstSemesterWithoutEvaluations
            | MetricField::SecondSemesterCredited
            | MetricField::SecondSemesterEnrolled
            | MetricField::SecondSemesterEvaluations
            | MetricField::SecondSemesterApproved
            | MetricField::SecondSemesterGrade
            | MetricField::SecondSemesterWithoutEvaluations
            | MetricField::UnemploymentRate
            | MetricField::InflationRate
            | MetricField::Gdp => FieldKind::Numeric,
            _ => FieldKind::Categorical,
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self.kind(), FieldKind::Numeric)
    }

    /// Categories this field counts towards; may be empty or contain several entries.
    pub fn categories(self) -> Vec<MetricCategory> {
        MetricCategory::ALL
            .into_iter()
            .filter(|category| category.contains(self))
            .collect()
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricField {
    type Err = MetricError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MetricField::ALL
            .into_iter()
            .find(|field| field.name() == value)
            .ok_or_else(|| MetricError::UnknownField(value.to_string()))
    }
}

impl Serialize for MetricField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for MetricField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Topical groupings used to track form progress. Groupings may overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Academic,
    SupportNetwork,
    Finance,
    Background,
}

const ACADEMIC_FIELDS: &[MetricField] = &[
    MetricField::ApplicationMode,
    MetricField::ApplicationOrder,
    MetricField::PreviousQualification,
    MetricField::FirstSemesterCredited,
    MetricField::FirstSemesterEnrolled,
    MetricField::FirstSemesterEvaluations,
    MetricField::FirstSemesterApproved,
    MetricField::FirstSemesterGrade,
    MetricField::FirstSemesterWithoutEvaluations,
    MetricField::SecondSemesterCredited,
    MetricField::SecondSemesterEnrolled,
    MetricField::SecondSemesterEvaluations,
    MetricField::SecondSemesterApproved,
    MetricField::SecondSemesterGrade,
    MetricField::SecondSemesterWithoutEvaluations,
];

const SUPPORT_NETWORK_FIELDS: &[MetricField] = &[
    MetricField::MaritalStatus,
    MetricField::MothersQualification,
    MetricField::FathersQualification,
    MetricField::MothersOccupation,
    MetricField::FathersOccupation,
    MetricField::Displaced,
    MetricField::EducationalSpecialNeeds,
    MetricField::International,
];

const FINANCE_FIELDS: &[MetricField] = &[
    MetricField::Debtor,
    MetricField::TuitionFeesUpToDate,
    MetricField::ScholarshipHolder,
    MetricField::UnemploymentRate,
    MetricField::InflationRate,
    MetricField::Gdp,
];

const BACKGROUND_FIELDS: &[MetricField] = &[
    MetricField::Course,
    MetricField::AttendanceType,
    MetricField::Nationality,
    MetricField::Gender,
    MetricField::AgeAtEnrolment,
];

impl MetricCategory {
    pub const ALL: [MetricCategory; 4] = [
        MetricCategory::Academic,
        MetricCategory::SupportNetwork,
        MetricCategory::Finance,
        MetricCategory::Background,
    ];

    pub const fn fields(self) -> &'static [MetricField] {
        match self {
            MetricCategory::Academic => ACADEMIC_FIELDS,
            MetricCategory::SupportNetwork => SUPPORT_NETWORK_FIELDS,
            MetricCategory::Finance => FINANCE_FIELDS,
            MetricCategory::Background => BACKGROUND_FIELDS,
        }
    }

    pub fn contains(self, field: MetricField) -> bool {
        self.fields().contains(&field)
    }

    pub const fn label(self) -> &'static str {
        match self {
            MetricCategory::Academic => "Academic",
            MetricCategory::SupportNetwork => "Support Network",
            MetricCategory::Finance => "Finance",
            MetricCategory::Background => "Background",
        }
    }
}

impl FromStr for MetricCategory {
    type Err = MetricError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "academic" => Ok(MetricCategory::Academic),
            "support_network" => Ok(MetricCategory::SupportNetwork),
            "finance" | "finances" => Ok(MetricCategory::Finance),
            "background" => Ok(MetricCategory::Background),
            _ => Err(MetricError::UnknownCategory(value.to_string())),
        }
    }
}
