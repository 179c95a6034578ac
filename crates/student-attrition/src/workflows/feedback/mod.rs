//! Free-text feedback left by form users. Records are written once and never read back
//! by the analysis flow.

pub mod domain;
pub mod router;
pub mod sink;

pub use domain::{FeedbackGenus, FeedbackRecord, FeedbackStatus, FeedbackSubmission};
pub use router::feedback_router;
pub use sink::{FeedbackError, FeedbackSink};
