use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sink::FeedbackError;

/// Kind of feedback the user selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackGenus {
    #[default]
    #[serde(rename = "General Feedback")]
    GeneralFeedback,
    #[serde(rename = "Feature Request")]
    FeatureRequest,
    #[serde(rename = "Bug Report")]
    BugReport,
}

/// Triage state of a stored record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackStatus {
    #[default]
    Active,
    Completed,
    #[serde(rename = "No Action Required")]
    NoActionRequired,
}

/// Body posted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    pub content: String,
    #[serde(default)]
    pub consent_to_dialog: bool,
    #[serde(default)]
    pub genus: FeedbackGenus,
    pub route_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub ip_address: String,
    pub content: String,
    pub consent_to_dialog: bool,
    pub genus: FeedbackGenus,
    pub route_name: String,
    pub status: FeedbackStatus,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    pub fn from_submission(
        submission: FeedbackSubmission,
        ip_address: impl Into<String>,
    ) -> Result<Self, FeedbackError> {
        if submission.content.trim().is_empty() {
            return Err(FeedbackError::MissingField("content"));
        }
        if submission.route_name.trim().is_empty() {
            return Err(FeedbackError::MissingField("routeName"));
        }

        Ok(Self {
            ip_address: ip_address.into(),
            content: submission.content,
            consent_to_dialog: submission.consent_to_dialog,
            genus: submission.genus,
            route_name: submission.route_name,
            status: FeedbackStatus::Active,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submission_defaults_genus_and_consent() {
        let submission: FeedbackSubmission = serde_json::from_value(json!({
            "content": "The finance page was confusing",
            "routeName": "finances"
        }))
        .expect("valid body");

        assert_eq!(submission.genus, FeedbackGenus::GeneralFeedback);
        assert!(!submission.consent_to_dialog);

        let record = FeedbackRecord::from_submission(submission, "10.0.0.7").expect("valid");
        assert_eq!(record.status, FeedbackStatus::Active);
        assert_eq!(record.ip_address, "10.0.0.7");
    }

    #[test]
    fn blank_content_is_rejected() {
        let submission = FeedbackSubmission {
            content: "  ".to_string(),
            consent_to_dialog: true,
            genus: FeedbackGenus::BugReport,
            route_name: "home".to_string(),
        };
        match FeedbackRecord::from_submission(submission, "unknown") {
            Err(FeedbackError::MissingField(field)) => assert_eq!(field, "content"),
            other => panic!("expected missing field, got {other:?}"),
        }
    }

    #[test]
    fn genus_uses_display_labels_on_the_wire() {
        let json = serde_json::to_value(FeedbackGenus::FeatureRequest).expect("serializes");
        assert_eq!(json, "Feature Request");
        let status = serde_json::to_value(FeedbackStatus::NoActionRequired).expect("serializes");
        assert_eq!(status, "No Action Required");
    }
}
