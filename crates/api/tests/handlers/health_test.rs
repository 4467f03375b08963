use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_version() {
    let ctx = TestContext::new().await;

    let body = ctx.server.get("/version").await.json::<Value>();

    assert_eq!(body["name"], json!("clinic-api"));
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}
