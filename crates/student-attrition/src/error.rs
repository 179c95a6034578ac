use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::catalog::CatalogError;
use crate::workflows::feedback::FeedbackError;
use crate::workflows::metrics::{MetricError, SubmissionFailure};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Request body or query string that could not be extracted.
    Rejected {
        status: StatusCode,
        message: &'static str,
        detail: String,
    },
    Metric(MetricError),
    IncompleteProfile { completion: f64 },
    AnalysisInProgress,
    Submission(SubmissionFailure),
    Catalog(CatalogError),
    Feedback(FeedbackError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Metric(_) | AppError::IncompleteProfile { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::AnalysisInProgress => StatusCode::CONFLICT,
            AppError::Submission(SubmissionFailure::Invalid(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Submission(SubmissionFailure::Remote(_)) => StatusCode::BAD_GATEWAY,
            AppError::Submission(SubmissionFailure::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Catalog(CatalogError::Unavailable) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Catalog(CatalogError::UnknownCategory(_)) => StatusCode::NOT_FOUND,
            AppError::Feedback(FeedbackError::MissingField(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected { status, .. } => *status,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Catalog(CatalogError::Repository(_))
            | AppError::Feedback(FeedbackError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to API clients; never the raw source chain.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Submission(failure) => failure.user_message(),
            AppError::Metric(err) => err.to_string(),
            AppError::Catalog(err) => err.to_string(),
            AppError::Feedback(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "invalid json: {}", err),
            AppError::Rejected { message, .. } => f.write_str(message),
            AppError::Metric(err) => write!(f, "profile error: {}", err),
            AppError::IncompleteProfile { completion } => write!(
                f,
                "profile is only {:.2}% complete; every field must be answered",
                completion
            ),
            AppError::AnalysisInProgress => write!(f, "an analysis is already in progress"),
            AppError::Submission(err) => write!(f, "submission failed: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Feedback(err) => write!(f, "feedback error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Metric(err) => Some(err),
            AppError::Submission(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Feedback(err) => Some(err),
            AppError::Rejected { .. }
            | AppError::IncompleteProfile { .. }
            | AppError::AnalysisInProgress => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        if let AppError::Rejected { detail, .. } = &self {
            tracing::debug!(%status, %detail, "request rejected");
        }

        let body = Json(json!({ "message": self.client_message() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        let message = match &rejection {
            JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON",
            JsonRejection::JsonDataError(_) => "request body does not match the expected shape",
            JsonRejection::MissingJsonContentType(_) => {
                "request body must be sent as application/json"
            }
            _ => "request body could not be read",
        };
        Self::Rejected {
            status,
            message,
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: "query string is not valid",
            detail: rejection.body_text(),
        }
    }
}

impl From<MetricError> for AppError {
    fn from(value: MetricError) -> Self {
        Self::Metric(value)
    }
}

impl From<SubmissionFailure> for AppError {
    fn from(value: SubmissionFailure) -> Self {
        Self::Submission(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<FeedbackError> for AppError {
    fn from(value: FeedbackError) -> Self {
        Self::Feedback(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::metrics::AnalyserError;
    use std::time::Duration;

    #[test]
    fn statuses_follow_error_classification() {
        assert_eq!(
            AppError::from(MetricError::UnknownField("x".to_string())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(CatalogError::Unavailable).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::from(SubmissionFailure::Timeout(Duration::from_secs(1))).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            AppError::from(SubmissionFailure::Remote(AnalyserError::Status(500))).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn remote_failures_hide_transport_details() {
        let err = AppError::from(SubmissionFailure::Remote(AnalyserError::Transport(
            "connection refused (os error 111)".to_string(),
        )));
        assert!(!err.client_message().contains("os error"));
    }
}
