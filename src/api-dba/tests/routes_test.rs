//! Integration tests for API route handlers
//!
//! Tests key endpoints:
//! - POST /api/generate-schema - Full description → schema pipeline
//! - POST /api/chat - Single-turn chat
//! - POST /api/generate-diagram - Diagram marker validation
//! - GET /health - Liveness
//! plus the auth gate and the single-upstream-attempt property.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use api_dba::auth::{generate_session_token, session::session_cookie_header};
use api_dba::routes::router;
use core_dba::AuthConfig;
use core_dba::llms::mock::{
    MockLlmProvider, sample_bare_response, sample_generated_schema_json, sample_prose_response,
};

const SESSION_SECRET: &str = "routes-test-secret";

/// Helper to build a POST request with a JSON body
fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

/// Helper to parse a JSON response body
async fn response_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

//
// POST /api/generate-schema tests
//

#[tokio::test]
async fn test_generate_schema_success() {
    let mock = Arc::new(MockLlmProvider::with_generated_schema());
    let app = router(mock.clone(), None);

    let request = post_json("/api/generate-schema", serde_json::json!({"prompt": "a blog with users and posts"}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    let expected: serde_json::Value = serde_json::from_str(sample_generated_schema_json()).unwrap();
    assert_eq!(body, expected);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_generate_schema_accepts_bare_json_response() {
    let mock = Arc::new(MockLlmProvider::with_default(&sample_bare_response()));
    let app = router(mock, None);

    let request = post_json("/api/generate-schema", serde_json::json!({"prompt": "a blog"}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_generate_schema_missing_prompt() {
    let mock = Arc::new(MockLlmProvider::with_generated_schema());
    let app = router(mock.clone(), None);

    let request = post_json("/api/generate-schema", serde_json::json!({}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Prompt is required");
    assert_eq!(mock.call_count(), 0, "rejected input must not reach the provider");
}

#[tokio::test]
async fn test_generate_schema_blank_prompt() {
    let mock = Arc::new(MockLlmProvider::with_generated_schema());
    let app = router(mock.clone(), None);

    let request = post_json("/api/generate-schema", serde_json::json!({"prompt": "   "}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_generate_schema_upstream_failure_is_500_with_one_attempt() {
    let mock = Arc::new(MockLlmProvider::with_failure());
    let app = router(mock.clone(), None);

    let request = post_json("/api/generate-schema", serde_json::json!({"prompt": "a blog"}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("Upstream model call failed"));
    assert_eq!(mock.call_count(), 1, "no automatic retry on upstream failure");
}

#[tokio::test]
async fn test_generate_schema_prose_response_is_500() {
    let mock = Arc::new(MockLlmProvider::with_default(sample_prose_response()));
    let app = router(mock, None);

    let request = post_json("/api/generate-schema", serde_json::json!({"prompt": "a blog"}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_generate_schema_incomplete_response_names_missing_keys() {
    let mut bundle: serde_json::Value = serde_json::from_str(sample_generated_schema_json()).unwrap();
    bundle.as_object_mut().unwrap().remove("mysqlCode");
    let mock = Arc::new(MockLlmProvider::with_default(&bundle.to_string()));
    let app = router(mock, None);

    let request = post_json("/api/generate-schema", serde_json::json!({"prompt": "a blog"}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("mysqlCode"));
}

//
// POST /api/chat tests
//

#[tokio::test]
async fn test_chat_success() {
    let mock = Arc::new(MockLlmProvider::with_default("A primary key identifies a row.\n"));
    let app = router(mock.clone(), None);

    let request = post_json("/api/chat", serde_json::json!({"message": "What is a primary key?"}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(body, serde_json::json!({"reply": "A primary key identifies a row."}));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_chat_missing_message() {
    let mock = Arc::new(MockLlmProvider::with_default("unused"));
    let app = router(mock.clone(), None);

    let request = post_json("/api/chat", serde_json::json!({}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Message is required");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_chat_upstream_failure_is_500() {
    let mock = Arc::new(MockLlmProvider::with_failure());
    let app = router(mock, None);

    let request = post_json("/api/chat", serde_json::json!({"message": "hello"}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

//
// POST /api/generate-diagram tests
//

#[tokio::test]
async fn test_validate_diagram_success() {
    let mock = Arc::new(MockLlmProvider::new());
    let app = router(mock.clone(), None);

    let diagram = "erDiagram\n  A ||--o{ B : has";
    let request = post_json("/api/generate-diagram", serde_json::json!({"diagramString": diagram}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(body, serde_json::json!({"validatedDiagram": diagram}));
    assert_eq!(mock.call_count(), 0, "diagram validation never calls the provider");
}

#[tokio::test]
async fn test_validate_diagram_missing_marker() {
    let mock = Arc::new(MockLlmProvider::new());
    let app = router(mock, None);

    let request = post_json("/api/generate-diagram", serde_json::json!({"diagramString": "not a diagram"}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validate_diagram_missing_field() {
    let mock = Arc::new(MockLlmProvider::new());
    let app = router(mock, None);

    let request = post_json("/api/generate-diagram", serde_json::json!({}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Diagram string is required");
}

//
// Auth gate tests
//

fn auth_config() -> Option<AuthConfig> {
    Some(AuthConfig {
        session_secret: SESSION_SECRET.to_string(),
        session_duration_seconds: 3600,
    })
}

#[tokio::test]
async fn test_auth_enabled_rejects_missing_cookie() {
    let mock = Arc::new(MockLlmProvider::with_generated_schema());
    let app = router(mock.clone(), auth_config());

    let request = post_json("/api/generate-schema", serde_json::json!({"prompt": "a blog"}));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_auth_enabled_rejects_garbage_token() {
    let mock = Arc::new(MockLlmProvider::with_generated_schema());
    let app = router(mock, auth_config());

    let mut request = post_json("/api/chat", serde_json::json!({"message": "hello"}));
    request
        .headers_mut()
        .insert(header::COOKIE, "db_architect_session=garbage".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_enabled_accepts_valid_token() {
    let mock = Arc::new(MockLlmProvider::with_generated_schema());
    let app = router(mock, auth_config());

    let token = generate_session_token(SESSION_SECRET).unwrap();
    let mut request = post_json("/api/generate-schema", serde_json::json!({"prompt": "a blog"}));
    request
        .headers_mut()
        .insert(header::COOKIE, session_cookie_header(&token).parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_auth_enabled_rejects_wrong_secret_token() {
    let mock = Arc::new(MockLlmProvider::with_generated_schema());
    let app = router(mock, auth_config());

    let token = generate_session_token("some-other-secret").unwrap();
    let mut request = post_json("/api/generate-schema", serde_json::json!({"prompt": "a blog"}));
    request
        .headers_mut()
        .insert(header::COOKIE, session_cookie_header(&token).parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

//
// GET /health tests
//

#[tokio::test]
async fn test_health_is_public() {
    let mock = Arc::new(MockLlmProvider::new());
    let app = router(mock, auth_config());

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
