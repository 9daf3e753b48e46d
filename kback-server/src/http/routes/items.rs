//! Item lookup endpoint
//!
//! GET /api/v1/items/{item_id}?q=... echoes the parsed id and optional
//! query string. A non-integer id is rejected with 422 by [`ValidPath`].
//! When `q` is repeated the last value wins.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::http::extractors::{ValidPath, ValidQuery};

/// `q` serializes as `null` when absent
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ItemResponse {
    pub item_id: i64,
    pub q: Option<String>,
}

/// GET /api/v1/items/{item_id}
async fn read_item(
    ValidPath(item_id): ValidPath<i64>,
    ValidQuery(params): ValidQuery<Vec<(String, String)>>,
) -> Json<ItemResponse> {
    let q = params
        .into_iter()
        .rev()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value);

    Json(ItemResponse { item_id, q })
}

/// Item routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api/v1/items/{item_id}", get(read_item))
}
