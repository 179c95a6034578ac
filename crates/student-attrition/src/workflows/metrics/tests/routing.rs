use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

fn post_profile(body: &Value) -> Request<Body> {
    Request::post("/api/performance-analysis")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn analysis_route_returns_result_with_display_score() {
    let (router, analyser) = router_with(Reply::Analysis(at_risk_analysis()));

    let response = router.oneshot(post_profile(&complete_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["mainFeature"], "debtor");
    assert_eq!(body["categoryContribution"]["supportNetwork"], json!(0.3));
    assert_eq!(body["displayScore"], "73.00");
    assert_eq!(analyser.calls().len(), 1);
}

#[tokio::test]
async fn empty_remote_result_returns_no_content() {
    let (router, _) = router_with(Reply::Empty);

    let response = router.oneshot(post_profile(&complete_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn incomplete_profile_is_unprocessable() {
    let (router, analyser) = router_with(Reply::Analysis(at_risk_analysis()));
    let mut body = complete_body();
    body["gender"] = Value::Null;

    let response = router.oneshot(post_profile(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let message = json_body(response).await["message"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(message.contains("97.06%"), "unexpected message: {message}");
    assert!(analyser.calls().is_empty());
}

#[tokio::test]
async fn unknown_field_is_unprocessable() {
    let (router, _) = router_with(Reply::Empty);
    let mut body = complete_body();
    body["shoe_size"] = json!(44);

    let response = router.oneshot(post_profile(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let message = json_body(response).await["message"].clone();
    assert_eq!(message, "unknown profile field 'shoe_size'");
}

#[tokio::test]
async fn remote_failure_maps_to_bad_gateway() {
    let (router, _) = router_with(Reply::Status(500));

    let response = router.oneshot(post_profile(&complete_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(
        body["message"],
        "performance analysis is unavailable right now, please try again later"
    );
}

#[tokio::test]
async fn slow_remote_maps_to_gateway_timeout() {
    let (router, _) = router_with(Reply::Hang);

    let response = router.oneshot(post_profile(&complete_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn malformed_json_gets_message_envelope() {
    let (router, analyser) = router_with(Reply::Empty);

    let response = router
        .oneshot(
            Request::post("/api/performance-analysis")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let body = json_body(response).await;
    assert_eq!(body["message"], "request body is not valid JSON");
    assert!(analyser.calls().is_empty());
}

#[tokio::test]
async fn wrongly_typed_answer_gets_message_envelope() {
    let (router, analyser) = router_with(Reply::Empty);
    let mut body = complete_body();
    body["displaced"] = json!(true);

    let response = router.oneshot(post_profile(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(
        body["message"],
        "request body does not match the expected shape"
    );
    assert!(!body["message"].as_str().unwrap().contains("untagged"));
    assert!(analyser.calls().is_empty());
}
