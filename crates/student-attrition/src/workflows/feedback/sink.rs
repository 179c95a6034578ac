use super::domain::FeedbackRecord;

/// Write-only destination for feedback records.
pub trait FeedbackSink: Send + Sync {
    fn record(&self, record: FeedbackRecord) -> Result<(), FeedbackError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("feedback is missing required field '{0}'")]
    MissingField(&'static str),
    #[error("feedback store unavailable: {0}")]
    Unavailable(String),
}
