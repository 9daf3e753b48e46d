//! Request-scoped database sessions
//!
//! A [`Session`] is one open transaction owned by exactly one unit of work
//! (an HTTP request or a test). It is not `Clone` and is never shared.
//!
//! Release happens on every exit path:
//! - [`Session::commit`] / [`Session::rollback`] consume the session
//! - dropping it (early return, `?`, panic, cancelled future) rolls back
//!
//! Callers get sessions from a [`SessionProvider`], which is the seam tests
//! use to swap the backing store.

use std::fmt;
use std::ops::{Deref, DerefMut};

use async_trait::async_trait;
use sqlx::{Any, AnyConnection, AnyPool, Transaction};
use uuid::Uuid;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The backing store could not be reached
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Sqlx(#[source] sqlx::Error),
}

/// Connectivity failures stay connection errors wherever they happen,
/// mid-query included.
impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Connection(e),
            other => Self::Sqlx(other),
        }
    }
}

impl DbError {
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// What [`Session::commit`] does when the scope finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndPolicy {
    /// Normal unit-of-work semantics
    Commit,

    /// Always roll back, even on commit (test scopes)
    Rollback,
}

/// One unit-of-work database handle.
///
/// Derefs to the transaction's connection, so queries run against it
/// directly:
///
/// ```ignore
/// let mut session = provider.acquire().await?;
/// sqlx::query("INSERT INTO notes (label) VALUES ($1)")
///     .bind("hello")
///     .execute(&mut *session)
///     .await?;
/// session.commit().await?;
/// ```
pub struct Session {
    id: Uuid,
    policy: EndPolicy,
    tx: Transaction<'static, Any>,
}

impl Session {
    /// Open a session on `pool`.
    ///
    /// Any failure to obtain a connection or start the transaction is a
    /// [`DbError::Connection`].
    pub async fn begin(pool: &AnyPool, policy: EndPolicy) -> Result<Self, DbError> {
        let tx = pool.begin().await.map_err(DbError::Connection)?;
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, ?policy, "session acquired");

        Ok(Self { id, policy, tx })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn policy(&self) -> EndPolicy {
        self.policy
    }

    /// Finish the unit of work according to the session's [`EndPolicy`].
    pub async fn commit(self) -> Result<(), DbError> {
        match self.policy {
            EndPolicy::Commit => {
                self.tx.commit().await?;
                tracing::debug!(session = %self.id, "session committed");
            }
            EndPolicy::Rollback => {
                self.tx.rollback().await?;
                tracing::debug!(session = %self.id, "session rolled back (rollback policy)");
            }
        }
        Ok(())
    }

    /// Discard all work done in this session.
    pub async fn rollback(self) -> Result<(), DbError> {
        self.tx.rollback().await?;
        tracing::debug!(session = %self.id, "session rolled back");
        Ok(())
    }
}

impl Deref for Session {
    type Target = AnyConnection;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.tx
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Source of per-scope sessions.
///
/// Implementations share the contract: every call returns a fresh,
/// independent session, or fails visibly. No retries.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn acquire(&self) -> Result<Session, DbError>;
}

/// Production provider: sessions commit when asked to.
#[derive(Debug, Clone)]
pub struct PoolSessionProvider {
    pool: AnyPool,
}

impl PoolSessionProvider {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionProvider for PoolSessionProvider {
    async fn acquire(&self) -> Result<Session, DbError> {
        Session::begin(&self.pool, EndPolicy::Commit).await
    }
}

/// Test provider: every session is rolled back at scope end, so no test
/// observes another test's writes.
#[derive(Debug, Clone)]
pub struct RollbackSessionProvider {
    pool: AnyPool,
}

impl RollbackSessionProvider {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionProvider for RollbackSessionProvider {
    async fn acquire(&self) -> Result<Session, DbError> {
        Session::begin(&self.pool, EndPolicy::Rollback).await
    }
}
