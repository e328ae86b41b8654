//! Table handle.

use crate::db::driver::Connection;
use crate::db::executor::BatchExecutor;
use crate::db::sql;
use crate::error::OrmResult;
use crate::models::Record;
use std::sync::Arc;
use tracing::debug;

/// A table name bound to a shared connection handle.
pub struct Table<C> {
    name: String,
    conn: Arc<C>,
}

impl<C> Clone for Table<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            conn: Arc::clone(&self.conn),
        }
    }
}

impl<C> std::fmt::Debug for Table<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<C: Connection> Table<C> {
    pub fn new(name: impl Into<String>, conn: Arc<C>) -> Self {
        Self {
            name: name.into(),
            conn,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connection(&self) -> &Arc<C> {
        &self.conn
    }

    /// Insert one record and return the engine-assigned auto-increment id.
    ///
    /// Values are always passed as bound parameters.
    pub async fn insert<R: Record + ?Sized>(&self, record: &R) -> OrmResult<u64> {
        let statement = sql::insert_statement(&self.name, record.fields())?;
        let outcome = self.conn.execute(&statement.sql, &statement.params).await?;

        debug!(
            table = %self.name,
            last_insert_id = outcome.last_insert_id,
            "Inserted record"
        );
        Ok(outcome.last_insert_id)
    }

    /// Insert records in chunks of 50 and return the total affected rows.
    pub async fn batch_insert<R: Record>(&self, records: &[R]) -> OrmResult<u64> {
        self.batch_insert_with(&BatchExecutor::default(), records)
            .await
    }

    pub async fn batch_insert_with<R: Record>(
        &self,
        executor: &BatchExecutor,
        records: &[R],
    ) -> OrmResult<u64> {
        executor.execute(self, records).await
    }
}
