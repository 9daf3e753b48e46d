//! HTTP server command
//!
//! Connects the production session provider and runs the API until
//! Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use kback_server::config::{DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};
use kback_server::db::{create_pool, PoolSessionProvider};
use kback_server::{run_server, AppState, DatabaseConfig, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "KBACK_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Seconds to wait for a database connection
    #[arg(long, env = "DATABASE_ACQUIRE_TIMEOUT_SECS", default_value_t = DEFAULT_ACQUIRE_TIMEOUT.as_secs())]
    pub acquire_timeout_secs: u64,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let db_config = DatabaseConfig::new(database_url)
        .with_max_connections(args.max_connections)
        .with_acquire_timeout(Duration::from_secs(args.acquire_timeout_secs));
    tracing::info!(database = %db_config.redacted_url(), "Connecting to database");

    // Fails fast if the database is unreachable
    let pool = create_pool(&db_config)
        .await
        .context("Failed to create database pool")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };
    tracing::info!("Starting k_back server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(AppState::new(PoolSessionProvider::new(pool)), config)
        .await
        .context("Server error")?;

    Ok(())
}
