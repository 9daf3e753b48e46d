//! Schema administration
//!
//! Creates all tables once before any session is acquired and drops them
//! once after every session is closed. Each operation runs in its own
//! transaction, so a failure leaves the schema as it was.

use sqlx::AnyPool;

use super::DbError;

/// A table definition: name plus the column list of its `CREATE TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static str,
}

impl Table {
    fn create_sql(&self) -> String {
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, self.columns)
    }

    fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name)
    }
}

/// Ordered set of tables.
///
/// Tables are created in registration order and dropped in reverse, so a
/// table may reference any table registered before it.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// The service's own schema. It defines no tables yet.
    pub fn application() -> Self {
        Self::new()
    }

    pub fn table(mut self, name: &'static str, columns: &'static str) -> Self {
        self.tables.push(Table { name, columns });
        self
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Create every table that does not exist yet.
    pub async fn create_all(&self, pool: &AnyPool) -> Result<(), DbError> {
        let mut tx = pool.begin().await.map_err(DbError::Connection)?;
        for table in &self.tables {
            let sql = table.create_sql();
            sqlx::query(&sql).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        tracing::info!(tables = self.tables.len(), "schema created");
        Ok(())
    }

    /// Drop every table, in reverse registration order.
    pub async fn drop_all(&self, pool: &AnyPool) -> Result<(), DbError> {
        let mut tx = pool.begin().await.map_err(DbError::Connection)?;
        for table in self.tables.iter().rev() {
            let sql = table.drop_sql();
            sqlx::query(&sql).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        tracing::info!(tables = self.tables.len(), "schema dropped");
        Ok(())
    }
}
