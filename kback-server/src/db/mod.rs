//! Database layer - connection pool, sessions and schema administration
//!
//! # Design Principles
//!
//! - One session per unit of work; a session is one open transaction
//! - A session is released on every exit path: dropping it rolls back
//! - Providers are passed in at construction, never looked up globally
//! - Schema create/drop is administrative and separate from acquisition

pub mod pool;
pub mod schema;
pub mod session;

pub use pool::create_pool;
pub use schema::Schema;
pub use session::{
    DbError, EndPolicy, PoolSessionProvider, RollbackSessionProvider, Session, SessionProvider,
};
