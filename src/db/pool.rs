//! Named connection pool.
//!
//! Maps a logical database name to one shared connection handle.
//!
//! # Concurrency Safety
//!
//! - Each name owns an `Arc<OnceCell<..>>`. The cell is created under the map's
//!   write lock, so concurrent registrations of the same name share one cell.
//! - `OnceCell::get_or_try_init` makes the open single-flight: racing callers
//!   wait for the first open instead of opening their own handle.
//! - A failed open leaves the cell empty; nothing half-built is ever visible
//!   and the next registration retries.
//! - The map lock is never held across an await on the driver.
//!
//! Handles live as long as the pool. A failed ping is reported to the caller
//! but the handle stays in place; there is no automatic reconnect.

use crate::config::ConnectionConfig;
use crate::db::driver::{Connection, Driver};
use crate::db::table::Table;
use crate::error::{OrmError, OrmResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, warn};

type Slot<C> = Arc<OnceCell<Arc<C>>>;

pub struct ConnectionPool<D: Driver> {
    driver: D,
    handles: RwLock<HashMap<String, Slot<D::Conn>>>,
}

impl<D: Driver> std::fmt::Debug for ConnectionPool<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("driver", &D::NAME)
            .finish_non_exhaustive()
    }
}

impl<D: Driver> ConnectionPool<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            handles: RwLock::new(HashMap::new()),
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Register `name`, opening a connection on first use.
    ///
    /// If `name` already has a live handle it is pinged and the ping result is
    /// returned. `config` is only used when a connection has to be opened.
    pub async fn register(&self, name: &str, config: &ConnectionConfig) -> OrmResult<()> {
        if name.is_empty() {
            return Err(OrmError::invalid_input("Database name cannot be empty"));
        }

        let slot = self.slot(name).await;

        if let Some(conn) = slot.get() {
            return conn.ping().await.inspect_err(|e| {
                warn!(database = %name, error = %e, "Ping failed for registered database");
            });
        }

        slot.get_or_try_init(|| async {
            info!(
                database = %name,
                driver = D::NAME,
                dsn = %config.masked_data_source_name(),
                "Opening connection"
            );
            let conn = self.driver.open(config).await.inspect_err(|e| {
                warn!(database = %name, error = %e, "Failed to open connection");
            })?;
            info!(database = %name, "Connection registered");
            Ok::<_, OrmError>(Arc::new(conn))
        })
        .await?;

        Ok(())
    }

    /// Get the handle registered under `name`.
    pub async fn get(&self, name: &str) -> OrmResult<Arc<D::Conn>> {
        let handles = self.handles.read().await;
        handles
            .get(name)
            .and_then(|slot| slot.get())
            .cloned()
            .ok_or_else(|| OrmError::database_not_found(name))
    }

    /// Bind `table` to the handle registered under `database`.
    pub async fn table(&self, database: &str, table: &str) -> OrmResult<Table<D::Conn>> {
        let conn = self.get(database).await?;
        Ok(Table::new(table, conn))
    }

    /// Number of opened handles.
    pub async fn len(&self) -> usize {
        let handles = self.handles.read().await;
        handles.values().filter(|slot| slot.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Names with an opened handle.
    pub async fn names(&self) -> Vec<String> {
        let handles = self.handles.read().await;
        let mut names: Vec<String> = handles
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Get or create the cell for `name` under the write lock.
    async fn slot(&self, name: &str) -> Slot<D::Conn> {
        {
            let handles = self.handles.read().await;
            if let Some(slot) = handles.get(name) {
                return Arc::clone(slot);
            }
        }

        let mut handles = self.handles.write().await;
        let slot = handles.entry(name.to_string()).or_insert_with(|| {
            debug!(database = %name, "Creating pool slot");
            Arc::new(OnceCell::new())
        });
        Arc::clone(slot)
    }
}
