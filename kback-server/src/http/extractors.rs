//! Custom Axum extractors
//!
//! Input rejections become [`ApiError::Validation`] (422) before any
//! handler logic runs.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::server::AppState;
use crate::db::Session;

/// Typed path parameters; parse failures are 422
pub struct ValidPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(PathRejection::FailedToDeserializePathParams(e)) => Err(ApiError::Validation {
                location: "path",
                message: e.body_text(),
            }),
            // Route/handler mismatch, not client input
            Err(other) => Err(ApiError::Internal {
                message: other.body_text(),
            }),
        }
    }
}

/// Typed query string; parse failures are 422
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation {
                location: "query",
                message: e.body_text(),
            })?;

        Ok(Self(value))
    }
}

/// One session per request, from the state's provider.
///
/// The session is dropped (and rolled back) when the handler returns unless
/// the handler commits it.
impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.sessions().acquire().await?)
    }
}
