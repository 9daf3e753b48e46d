//! Health check endpoint
//!
//! GET /health acquires a request-scoped session and pings the backing
//! store, so a reachable server with an unreachable database reports 503.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use sqlx::Connection;

use crate::db::{DbError, Session};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /health
async fn health(mut session: Session) -> Result<Json<HealthResponse>, ApiError> {
    session.ping().await.map_err(DbError::Connection)?;
    session.rollback().await?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: "ok",
    }))
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
