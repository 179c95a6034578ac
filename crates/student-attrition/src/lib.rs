//! Student attrition analysis: profile completion tracking, the option catalog the
//! form draws its answers from, and submission of finished profiles to the
//! prediction service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

pub use error::AppError;
