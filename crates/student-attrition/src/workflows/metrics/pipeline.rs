use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::coercion::{coerce_profile, CoercionPolicy};
use super::profile::MetricProfile;
use super::results::{PerformanceResult, RemoteAnalysis};
use super::session::MetricSession;
use super::MetricError;
use crate::config::PredictionConfig;

/// Remote prediction function. `Ok(None)` means the service answered with an empty body.
#[async_trait]
pub trait PerformanceAnalyser: Send + Sync {
    async fn analyse(
        &self,
        profile: &MetricProfile,
    ) -> Result<Option<RemoteAnalysis>, AnalyserError>;
}

/// Transport-level failures reported by an analyser.
#[derive(Debug, thiserror::Error)]
pub enum AnalyserError {
    #[error("prediction service unreachable: {0}")]
    Transport(String),
    #[error("prediction service responded with status {0}")]
    Status(u16),
    #[error("prediction service returned an unreadable body: {0}")]
    Malformed(String),
}

/// Why a submission could not produce a result.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionFailure {
    #[error(transparent)]
    Invalid(#[from] MetricError),
    #[error(transparent)]
    Remote(#[from] AnalyserError),
    #[error("prediction service did not respond within {0:?}")]
    Timeout(Duration),
}

impl SubmissionFailure {
    /// Text suitable for showing to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionFailure::Invalid(err) => err.to_string(),
            SubmissionFailure::Remote(_) | SubmissionFailure::Timeout(_) => {
                "performance analysis is unavailable right now, please try again later"
                    .to_string()
            }
        }
    }
}

/// Why a submission finished without contacting the service or without a result.
#[derive(Debug, Clone, PartialEq)]
pub enum NoOpReason {
    Incomplete { completion: f64 },
    AlreadyAnalysing,
    EmptyResponse,
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    Completed(PerformanceResult),
    NoOp(NoOpReason),
    Failure(SubmissionFailure),
}

impl SubmissionOutcome {
    pub fn result(&self) -> Option<&PerformanceResult> {
        match self {
            SubmissionOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }
}

/// Gates, coerces and submits a session's profile, then records the normalized result.
pub struct SubmissionPipeline<A> {
    analyser: Arc<A>,
    timeout: Duration,
    policy: CoercionPolicy,
}

impl<A> SubmissionPipeline<A>
where
    A: PerformanceAnalyser + 'static,
{
    pub fn new(analyser: Arc<A>, config: &PredictionConfig) -> Self {
        Self::with_settings(analyser, config.timeout, config.numeric_policy)
    }

    pub fn with_settings(analyser: Arc<A>, timeout: Duration, policy: CoercionPolicy) -> Self {
        Self {
            analyser,
            timeout,
            policy,
        }
    }

    pub fn policy(&self) -> CoercionPolicy {
        self.policy
    }

    pub async fn submit(&self, session: &mut MetricSession) -> SubmissionOutcome {
        if !session.is_complete() {
            let completion = session.completion();
            debug!(completion, "submission skipped: profile incomplete");
            return SubmissionOutcome::NoOp(NoOpReason::Incomplete { completion });
        }
        if session.is_analysing() {
            debug!("submission skipped: analysis already in flight");
            return SubmissionOutcome::NoOp(NoOpReason::AlreadyAnalysing);
        }

        let flag = session.in_flight();
        let _in_flight = flag.raise();

        if let Err(err) = coerce_profile(&mut session.profile, self.policy) {
            warn!(error = %err, "submission rejected before transmission");
            session.reset_results();
            return SubmissionOutcome::Failure(err.into());
        }

        let call = self.analyser.analyse(&session.profile);
        let answered = tokio::time::timeout(self.timeout, call).await;
        let response = match answered {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                warn!(error = %err, "performance analysis failed");
                session.reset_results();
                return SubmissionOutcome::Failure(err.into());
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "performance analysis timed out");
                session.reset_results();
                return SubmissionOutcome::Failure(SubmissionFailure::Timeout(self.timeout));
            }
        };

        match response {
            Some(remote) => {
                let result = PerformanceResult::from(remote);
                info!(label = %result.label, score = result.score, "performance analysis completed");
                session.store_results(result.clone());
                SubmissionOutcome::Completed(result)
            }
            None => {
                warn!("prediction service returned an empty body");
                session.reset_results();
                SubmissionOutcome::NoOp(NoOpReason::EmptyResponse)
            }
        }
    }
}
