mod common;

use std::sync::Arc;

use axum::http::{StatusCode, header};
use serde_json::json;
use tower::ServiceExt;

use common::{
    DRIVER_ERROR, FailingRepository, InMemoryRepository, get, send, setup_test_app, test_state,
    token_with_scope,
};
use doe_resource_server::router::init_router;

const PUBLIC_URI: &str = "/rest/v1/resource/public";
const SECRET_URI: &str = "/rest/v1/resource/secret";

#[tokio::test]
async fn test_public_info_with_read_scope() {
    let app = setup_test_app();
    let token = token_with_scope("resource:read");

    let (status, body) = send(app, get(PUBLIC_URI, Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "code": "",
            "message": "OK",
            "data": ["public one", "public two"]
        })
    );
}

#[tokio::test]
async fn test_secret_info_with_admin_scope() {
    let app = setup_test_app();
    let token = token_with_scope("ADMIN");

    let (status, body) = send(app, get(SECRET_URI, Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "");
    assert_eq!(body["data"], json!(["secret one"]));
}

#[tokio::test]
async fn test_secret_info_requires_admin_scope() {
    let app = setup_test_app();
    let token = token_with_scope("resource:read");

    let (status, body) = send(app, get(SECRET_URI, Some(&token))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "");
    assert_eq!(body["message"], "Access Denied");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_public_info_requires_read_scope() {
    let app = setup_test_app();
    let token = token_with_scope("ADMIN");

    let (status, body) = send(app, get(PUBLIC_URI, Some(&token))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access Denied");
}

#[tokio::test]
async fn test_empty_table_returns_empty_list() {
    let app = init_router(test_state(
        Arc::new(InMemoryRepository(Vec::new())),
        Arc::new(InMemoryRepository(Vec::new())),
    ));
    let token = token_with_scope("resource:read ADMIN");

    let (status, body) = send(app, get(PUBLIC_URI, Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_data_access_failure_hides_driver_message() {
    let app = init_router(test_state(
        Arc::new(FailingRepository),
        Arc::new(FailingRepository),
    ));
    let token = token_with_scope("resource:read");

    let response = app
        .oneshot(get(PUBLIC_URI, Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json;charset=UTF-8"
    );

    let body = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(!text.contains(DRIVER_ERROR));
    assert!(!text.contains("password"));

    let body: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["code"], "");
    assert_eq!(body["message"], "Internal Server Error");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = setup_test_app();
    let token = token_with_scope("resource:read");

    let response = app
        .oneshot(get(PUBLIC_URI, Some(&token)))
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["x-xss-protection"], "1; mode=block");
}
