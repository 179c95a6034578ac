//! Student performance metrics: the fixed answer schema, completion tracking over
//! the topical categories, and the submission pipeline that sends a finished
//! profile to the prediction service and normalizes what comes back.

pub mod client;
pub mod coercion;
pub mod pipeline;
pub mod profile;
pub mod results;
pub mod router;
pub mod schema;
pub mod session;

#[cfg(test)]
mod tests;

pub use client::HttpPerformanceAnalyser;
pub use coercion::{coerce_numeric, coerce_profile, CoercionPolicy};
pub use pipeline::{
    AnalyserError, NoOpReason, PerformanceAnalyser, SubmissionFailure, SubmissionOutcome,
    SubmissionPipeline,
};
pub use profile::{CompletionSummary, MetricProfile, MetricValue};
pub use results::{CategoryContribution, PerformanceResult, PerformanceResultView, RemoteAnalysis};
pub use router::analysis_router;
pub use schema::{FieldKind, MetricCategory, MetricField};
pub use session::{InFlightFlag, MetricSession};

/// Errors raised while editing or preparing a profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    #[error("unknown profile field '{0}'")]
    UnknownField(String),
    #[error("unknown metric category '{0}'")]
    UnknownCategory(String),
    #[error("'{value}' is not a valid number for {field}")]
    InvalidNumericInput { field: MetricField, value: String },
}
