//! kback-server: HTTP API for k_back
//!
//! Exposes two read-only routes and the request-scoped database session
//! seam the rest of the service is built on. Session providers are passed
//! into [`AppState`] at construction, so tests swap the backing store
//! without touching route code.

pub mod config;
pub mod db;
pub mod error;
pub mod http;

pub use config::DatabaseConfig;
pub use error::{Error, Result};
pub use http::{build_router, run_server, AppState, ServerConfig};
