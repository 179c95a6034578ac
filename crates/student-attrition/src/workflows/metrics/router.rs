use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use super::pipeline::{NoOpReason, PerformanceAnalyser, SubmissionOutcome, SubmissionPipeline};
use super::profile::{MetricProfile, MetricValue};
use super::results::PerformanceResultView;
use super::session::MetricSession;
use crate::error::AppError;

/// Router running the submission pipeline for a posted profile.
pub fn analysis_router<A>(pipeline: Arc<SubmissionPipeline<A>>) -> Router
where
    A: PerformanceAnalyser + 'static,
{
    Router::new()
        .route("/api/performance-analysis", post(analyse_handler::<A>))
        .with_state(pipeline)
}

pub(crate) async fn analyse_handler<A>(
    State(pipeline): State<Arc<SubmissionPipeline<A>>>,
    body: Result<axum::Json<BTreeMap<String, Option<MetricValue>>>, JsonRejection>,
) -> Response
where
    A: PerformanceAnalyser + 'static,
{
    let axum::Json(answers) = match body {
        Ok(body) => body,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    let profile = match MetricProfile::from_entries(answers) {
        Ok(profile) => profile,
        Err(err) => return AppError::from(err).into_response(),
    };

    let mut session = MetricSession::with_profile(profile);
    match pipeline.submit(&mut session).await {
        SubmissionOutcome::Completed(result) => {
            let view = PerformanceResultView::from(result);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        SubmissionOutcome::NoOp(NoOpReason::EmptyResponse) => {
            StatusCode::NO_CONTENT.into_response()
        }
        SubmissionOutcome::NoOp(NoOpReason::Incomplete { completion }) => {
            AppError::IncompleteProfile { completion }.into_response()
        }
        SubmissionOutcome::NoOp(NoOpReason::AlreadyAnalysing) => {
            AppError::AnalysisInProgress.into_response()
        }
        SubmissionOutcome::Failure(failure) => AppError::from(failure).into_response(),
    }
}
