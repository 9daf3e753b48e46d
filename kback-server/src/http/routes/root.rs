//! Root acknowledgement endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

pub const ROOT_MESSAGE: &str = "Hello from k_back API";

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// GET /
async fn read_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE,
    })
}

/// Root routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(read_root))
}
