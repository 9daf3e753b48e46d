//! HTTP API tests
//!
//! Drive the full router (tracing and CORS layers included) with
//! `tower::ServiceExt::oneshot`.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use kback_server::{build_router, AppState, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{notes_schema, TestDatabase, UnreachableSessions};

fn app(state: AppState) -> Router {
    build_router(state, &ServerConfig::default())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_read_root() {
    let app = app(AppState::new(UnreachableSessions));

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Hello from k_back API"}));
}

#[tokio::test]
async fn test_read_item() {
    let app = app(AppState::new(UnreachableSessions));

    let (status, body) = get(&app, "/api/v1/items/42?q=test_query").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"item_id": 42, "q": "test_query"}));
}

#[tokio::test]
async fn test_read_item_not_an_int() {
    let app = app(AppState::new(UnreachableSessions));

    let (status, body) = get(&app, "/api/v1/items/not-an-int").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["location"], "path");
}

#[tokio::test]
async fn item_ids_cover_the_integer_range() {
    let app = app(AppState::new(UnreachableSessions));

    for item_id in [0_i64, -17, i64::MAX, i64::MIN] {
        let (status, body) = get(&app, &format!("/api/v1/items/{item_id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"item_id": item_id, "q": null}));
    }
}

#[tokio::test]
async fn query_values_are_decoded() {
    let app = app(AppState::new(UnreachableSessions));

    let (_, body) = get(&app, "/api/v1/items/1?q=hello%20world").await;
    assert_eq!(body["q"], "hello world");

    let (_, body) = get(&app, "/api/v1/items/1?q=").await;
    assert_eq!(body["q"], "");
}

#[tokio::test]
async fn root_is_stateless() {
    let app = app(AppState::new(UnreachableSessions));

    let (_, first) = get(&app, "/").await;
    get(&app, "/api/v1/items/5?q=x").await;
    get(&app, "/api/v1/items/nope").await;
    let (status, second) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
}

#[tokio::test]
async fn health_pings_database() {
    let db = TestDatabase::setup(notes_schema()).await;
    let app = app(AppState::new(db.sessions()));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");

    db.teardown().await;
}

#[tokio::test]
async fn health_reports_unreachable_database() {
    let app = app(AppState::new(UnreachableSessions));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "database_unavailable");
}
