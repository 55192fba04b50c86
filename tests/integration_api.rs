//! API Integration Tests
//!
//! Drive the review router with in-memory collaborators.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

use helper_review::api::{self, AppState};
use helper_review::ReviewStatus;

mod common;

use common::{pending_helper, setup, TestApp};

fn router(app: &TestApp) -> Router {
    // Handlers are shared through the Arc held by TestApp
    api::create_router().with_state(AppState {
        handlers: app.handlers.clone(),
    })
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

#[tokio::test]
async fn test_review_then_validate() {
    let app = setup([pending_helper("jane@x.com")]);
    let router = router(&app);

    let (status, body) = send(&router, "POST", "/helpers/jane%40x.com/review", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "under_review");
    assert_eq!(body["is_pending_review"], false);

    let (status, body) = send(&router, "POST", "/helpers/jane%40x.com/review", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "already_under_review");
    assert_eq!(body["error"], "Helper is already under review");

    let (status, body) = send(&router, "POST", "/helpers/jane%40x.com/validate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["helper"]["status"], "validated");
    assert_eq!(body["helper"]["can_apply_to_events"], true);
    assert_eq!(body["notification"]["outcome"], "delivered");
}

#[tokio::test]
async fn test_reject_body_variants() {
    let app = setup([
        pending_helper("a@x.com"),
        pending_helper("b@x.com"),
        pending_helper("c@x.com"),
    ]);
    let router = router(&app);

    let (status, body) =
        send(&router, "POST", "/helpers/a%40x.com/reject", Some(r#"{"reason": ""}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Rejection reason is required");

    let (status, body) = send(&router, "POST", "/helpers/b%40x.com/reject", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["helper"]["status"], "rejected");
    assert!(body["helper"].get("rejection_reason").is_none());

    let (status, body) = send(
        &router,
        "POST",
        "/helpers/c%40x.com/reject",
        Some(r#"{"reason": "license expired"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["helper"]["rejection_reason"], "license expired");

    let (status, body) = send(&router, "POST", "/helpers/a%40x.com/reject", Some("{oops")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_request");
}

#[tokio::test]
async fn test_resubmission_blocked_under_review() {
    let app = setup([pending_helper("jane@x.com").with_status(ReviewStatus::UnderReview)]);
    let router = router(&app);

    let (status, body) = send(&router, "POST", "/helpers/jane%40x.com/credentials", None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "helper_under_review");
    assert!(app.helper("jane@x.com").await.under_review());
}

#[tokio::test]
async fn test_resubmission_reopens_review() {
    let app = setup([pending_helper("jane@x.com").with_status(ReviewStatus::Rejected {
        reason: Some("blurry".to_string()),
    })]);
    let router = router(&app);

    let (status, body) =
        send(&router, "POST", "/helpers/jane%40x.com/background-check", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invalidated"], true);
    assert_eq!(body["event"]["outcome"], "delivered");
    assert_eq!(body["helper"]["is_pending_review"], true);
}

#[tokio::test]
async fn test_review_queue_sorted() {
    let app = setup([
        pending_helper("zoe@x.com"),
        pending_helper("adam@x.com"),
        pending_helper("max@x.com").with_submissions(true, false),
    ]);
    let router = router(&app);

    let (status, body) = send(&router, "GET", "/review-queue", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["helpers"][0]["email"], "adam@x.com");
    assert_eq!(body["helpers"][1]["email"], "zoe@x.com");
}

#[tokio::test]
async fn test_unknown_helper() {
    let app = setup([]);
    let router = router(&app);

    let (status, body) = send(&router, "GET", "/helpers/ghost%40x.com", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "helper_not_found");
}

#[tokio::test]
async fn test_invalidate_route() {
    let app = setup([
        pending_helper("done@x.com").with_status(ReviewStatus::Validated),
        pending_helper("open@x.com"),
    ]);
    let router = router(&app);

    let (status, body) = send(&router, "POST", "/helpers/done%40x.com/invalidate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invalidated"], true);
    assert_eq!(body["helper"]["status"], "pending_review");

    let (status, body) = send(&router, "POST", "/helpers/open%40x.com/invalidate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invalidated"], false);
}
