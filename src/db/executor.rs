//! Batch insert execution.
//!
//! A batch is split into consecutive chunks of at most `chunk_size` records.
//! Each chunk becomes one multi-row INSERT that runs on its own tokio task
//! against the table's shared connection. All tasks are joined before the
//! result is reported:
//!
//! - every chunk succeeded: the summed affected-row count
//! - any chunk failed: [`OrmError::Batch`] carrying the rows inserted by the
//!   successful chunks and the error of the lowest-indexed failed chunk
//!
//! Chunks run in no particular order relative to each other; rows inside a
//! chunk keep their input order.

use crate::config::DEFAULT_CHUNK_SIZE;
use crate::db::driver::Connection;
use crate::db::sql;
use crate::db::table::Table;
use crate::error::{OrmError, OrmResult};
use crate::models::Record;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Chunked, concurrent batch insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchExecutor {
    chunk_size: usize,
}

impl BatchExecutor {
    /// Create an executor with the default chunk size of 50 records.
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Create an executor with a custom chunk size (at least 1).
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of statements a batch of `len` records is split into.
    pub fn chunk_count(&self, len: usize) -> usize {
        len.div_ceil(self.chunk_size)
    }

    /// Insert `records` into `table` and return the total affected rows.
    pub async fn execute<C, R>(&self, table: &Table<C>, records: &[R]) -> OrmResult<u64>
    where
        C: Connection,
        R: Record,
    {
        let Some(first) = records.first() else {
            return Err(OrmError::invalid_input("Batch contains no records"));
        };

        let columns = first.columns();
        if columns.is_empty() {
            return Err(OrmError::invalid_input(format!(
                "Records for table '{}' have no fields",
                table.name()
            )));
        }

        let start = Instant::now();
        let style = table.connection().bind_style();
        let total_chunks = self.chunk_count(records.len());

        debug!(
            table = %table.name(),
            records = records.len(),
            chunks = total_chunks,
            chunk_size = self.chunk_size,
            "Starting batch insert"
        );

        let mut tasks = JoinSet::new();
        let mut failures: Vec<(usize, OrmError)> = Vec::new();

        for (index, chunk) in records.chunks(self.chunk_size).enumerate() {
            let rows = chunk.iter().map(Record::values).collect();
            let statement = match sql::batch_insert_statement(
                table.name(),
                &columns,
                rows,
                index * self.chunk_size,
                style,
            ) {
                Ok(statement) => statement,
                Err(e) => {
                    warn!(table = %table.name(), chunk = index, error = %e, "Failed to build chunk statement");
                    failures.push((index, e));
                    continue;
                }
            };

            let conn = Arc::clone(table.connection());
            tasks.spawn(async move {
                let result = conn
                    .execute(&statement.sql, &statement.params)
                    .await
                    .map(|outcome| outcome.rows_affected);
                (index, result)
            });
        }

        let mut rows_affected = 0u64;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(rows))) => {
                    debug!(table = %table.name(), chunk = index, rows, "Chunk inserted");
                    rows_affected += rows;
                }
                Ok((index, Err(e))) => {
                    warn!(table = %table.name(), chunk = index, error = %e, "Chunk insert failed");
                    failures.push((index, e));
                }
                Err(e) => {
                    // Panicked or cancelled tasks lose their index; order them last
                    warn!(table = %table.name(), error = %e, "Chunk task did not complete");
                    failures.push((
                        usize::MAX,
                        OrmError::internal(format!("Chunk task did not complete: {}", e)),
                    ));
                }
            }
        }

        failures.sort_by_key(|(index, _)| *index);
        let failed_chunks = failures.len();
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match failures.into_iter().next() {
            None => {
                info!(
                    table = %table.name(),
                    chunks = total_chunks,
                    rows_affected,
                    elapsed_ms,
                    "Batch insert complete"
                );
                Ok(rows_affected)
            }
            Some((_, first_error)) => {
                warn!(
                    table = %table.name(),
                    failed_chunks,
                    chunks = total_chunks,
                    rows_affected,
                    elapsed_ms,
                    "Batch insert partially failed"
                );
                Err(OrmError::batch(
                    failed_chunks,
                    total_chunks,
                    rows_affected,
                    first_error,
                ))
            }
        }
    }
}

impl Default for BatchExecutor {
    fn default() -> Self {
        Self::new()
    }
}
