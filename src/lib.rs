//! lite-orm
//!
//! A minimal insert-only mapping layer for MySQL. It keeps a pool of named
//! connections and turns record values into parameter-bound INSERT
//! statements. Large record sets are split into chunks that are inserted
//! concurrently.
//!
//! ```no_run
//! use lite_orm::{ConnectionConfig, ConnectionPool, MySqlDriver, impl_record};
//!
//! struct User {
//!     id: u64,
//!     user_name: String,
//! }
//!
//! impl_record!(User { id, user_name => "name" });
//!
//! # async fn run() -> lite_orm::OrmResult<()> {
//! let pool = ConnectionPool::new(MySqlDriver::new());
//! let config = ConnectionConfig::new("root", "secret", "127.0.0.1", 3306, "shop");
//! pool.register("shop", &config).await?;
//!
//! let users = pool.table("shop", "users").await?;
//! let id = users.insert(&User { id: 0, user_name: "ada".into() }).await?;
//! let rows = users.batch_insert(&[User { id: 0, user_name: "bob".into() }]).await?;
//! # let _ = (id, rows);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;

pub use config::{ConnectionConfig, PoolOptions};
pub use db::{BatchExecutor, ConnectionPool, MySqlDriver, Table};
pub use error::{OrmError, OrmResult};
pub use models::{Field, Record, Value, extract_fields};
