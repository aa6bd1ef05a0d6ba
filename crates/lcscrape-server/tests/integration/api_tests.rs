use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::common::{StubOutcome, app, sample_record};

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_returns_200() {
    let app = app(StubOutcome::NotFound);

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn root_reports_identity_and_version() {
    let app = app(StubOutcome::NotFound);

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "LeetCode Profile Scraper API");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn post_scrape_returns_record() {
    let app = app(StubOutcome::Record(sample_record()));

    let body = serde_json::json!({"username": "testuser"});
    let response = app
        .oneshot(
            Request::post("/scrape-profile")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "testuser");
    assert_eq!(json["name"], "Jane Doe");
    assert_eq!(json["rank"], "1234");
    assert_eq!(json["acceptance_rate"], "65.67%");
    // Absent fields surface as null, not missing keys.
    assert!(json["location"].is_null());
    assert!(json["max_streak"].is_null());
    assert_eq!(json["skills"], serde_json::json!(["python", "sql"]));
}

#[tokio::test]
async fn get_scrape_takes_identifier_from_path() {
    let app = app(StubOutcome::Record(sample_record()));

    let response = app
        .oneshot(
            Request::get("/scrape-profile/someone_else")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "someone_else");
    assert_eq!(json["name"], "Jane Doe");
}

#[tokio::test]
async fn exhausted_strategies_return_404_with_fixed_message() {
    let app = app(StubOutcome::NotFound);

    let response = app
        .oneshot(
            Request::get("/scrape-profile/nobody")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "not_found");
    assert_eq!(json["message"], "profile not found or data not accessible");
}

#[tokio::test]
async fn unexpected_fault_returns_500_with_fault_text() {
    let app = app(StubOutcome::Fault("tab crashed".to_string()));

    let response = app
        .oneshot(
            Request::get("/scrape-profile/testuser")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "internal_error");
    assert!(json["message"].as_str().unwrap().contains("tab crashed"));
}

#[tokio::test]
async fn test_scrape_reports_backend_and_selector_counts() {
    let app = app(StubOutcome::NotFound);

    let response = app
        .oneshot(
            Request::get("/test-scrape/testuser")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["method"], "plain_fetch");
    assert_eq!(json["url"], "https://leetcode.com/u/testuser/");
    assert_eq!(json["content_length"], 2048);
    assert_eq!(json["profile_elements_found"]["name_elements"], 1);
    assert_eq!(json["profile_elements_found"]["linkedin_links"], 0);
}
