use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use student_attrition::workflows::catalog::{catalog_router, CatalogProvisioner, CatalogRepository};
use student_attrition::workflows::feedback::{feedback_router, FeedbackSink};
use student_attrition::workflows::metrics::{
    analysis_router, PerformanceAnalyser, SubmissionPipeline,
};

pub(crate) fn with_service_routes<A, R, S>(
    pipeline: Arc<SubmissionPipeline<A>>,
    provisioner: Arc<CatalogProvisioner<R>>,
    feedback: Arc<S>,
) -> axum::Router
where
    A: PerformanceAnalyser + 'static,
    R: CatalogRepository + 'static,
    S: FeedbackSink + 'static,
{
    analysis_router(pipeline)
        .merge(catalog_router(provisioner))
        .merge(feedback_router(feedback))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
