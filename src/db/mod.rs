//! Database access layer.
//!
//! This module provides:
//! - The driver seam ([`Driver`], [`Connection`]) and the sqlx-backed MySQL driver
//! - The named connection pool
//! - INSERT statement generation
//! - Table handles and the concurrent batch executor

pub mod driver;
pub mod executor;
pub mod mysql;
pub mod pool;
pub mod sql;
pub mod table;

pub use driver::{BindStyle, Connection, Driver, ExecOutcome};
pub use executor::BatchExecutor;
pub use mysql::{MySqlConnection, MySqlDriver};
pub use pool::ConnectionPool;
pub use sql::Statement;
pub use table::Table;
