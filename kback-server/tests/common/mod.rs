//! Shared test harness
//!
//! Each test gets a fresh SQLite database in a temp directory (WAL mode, so
//! readers never block on an open writer). The schema is created on setup
//! and dropped on teardown; sessions in between come from a provider the
//! test chooses.

#![allow(dead_code)]

use async_trait::async_trait;
use kback_server::db::{
    create_pool, DbError, PoolSessionProvider, RollbackSessionProvider, Schema, Session,
    SessionProvider,
};
use kback_server::DatabaseConfig;
use sqlx::AnyPool;
use tempfile::TempDir;

pub struct TestDatabase {
    pool: AnyPool,
    schema: Schema,
    _dir: TempDir,
}

impl TestDatabase {
    pub async fn setup(schema: Schema) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kback-test.db");
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let pool = create_pool(&DatabaseConfig::new(url))
            .await
            .expect("test pool");
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await
            .expect("enable WAL");
        schema.create_all(&pool).await.expect("create schema");

        Self {
            pool,
            schema,
            _dir: dir,
        }
    }

    /// Sessions that always roll back
    pub fn sessions(&self) -> RollbackSessionProvider {
        RollbackSessionProvider::new(self.pool.clone())
    }

    /// Sessions with production commit semantics
    pub fn committing_sessions(&self) -> PoolSessionProvider {
        PoolSessionProvider::new(self.pool.clone())
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub async fn teardown(self) {
        self.schema.drop_all(&self.pool).await.expect("drop schema");
        self.pool.close().await;
    }
}

/// Provider whose backing store is never reachable
pub struct UnreachableSessions;

#[async_trait]
impl SessionProvider for UnreachableSessions {
    async fn acquire(&self) -> Result<Session, DbError> {
        Err(DbError::Connection(sqlx::Error::PoolClosed))
    }
}

pub fn notes_schema() -> Schema {
    Schema::new().table("scratch_notes", "id INTEGER PRIMARY KEY, label TEXT NOT NULL")
}

pub async fn insert_note(session: &mut Session, label: &str) -> Result<(), DbError> {
    sqlx::query("INSERT INTO scratch_notes (label) VALUES (?)")
        .bind(label.to_string())
        .execute(&mut **session)
        .await?;
    Ok(())
}

pub async fn note_labels(session: &mut Session) -> Vec<String> {
    sqlx::query_scalar("SELECT label FROM scratch_notes ORDER BY id")
        .fetch_all(&mut **session)
        .await
        .expect("select notes")
}
