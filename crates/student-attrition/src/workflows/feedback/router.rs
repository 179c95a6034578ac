use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tracing::info;

use super::domain::{FeedbackRecord, FeedbackSubmission};
use super::sink::FeedbackSink;
use crate::error::AppError;

const FORWARDED_FOR: &str = "x-forwarded-for";
const UNKNOWN_CLIENT: &str = "unknown";

/// Router accepting feedback submissions.
pub fn feedback_router<S>(sink: Arc<S>) -> Router
where
    S: FeedbackSink + 'static,
{
    Router::new()
        .route("/api/feedback", post(submit_handler::<S>))
        .with_state(sink)
}

pub(crate) async fn submit_handler<S>(
    State(sink): State<Arc<S>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Result<axum::Json<FeedbackSubmission>, JsonRejection>,
) -> Response
where
    S: FeedbackSink + 'static,
{
    let axum::Json(submission) = match body {
        Ok(body) => body,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    let ip_address = client_address(&headers, peer.map(|ConnectInfo(addr)| addr));

    let record = match FeedbackRecord::from_submission(submission, ip_address) {
        Ok(record) => record,
        Err(err) => return AppError::from(err).into_response(),
    };
    let (genus, route, origin) = (
        record.genus,
        record.route_name.clone(),
        record.ip_address.clone(),
    );

    match sink.record(record) {
        Ok(()) => {
            info!(?genus, %route, %origin, "feedback recorded");
            StatusCode::OK.into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

/// First `X-Forwarded-For` hop, then the socket peer, then a placeholder.
pub(crate) fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
