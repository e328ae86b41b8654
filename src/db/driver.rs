//! Driver abstraction.
//!
//! [`Driver`] opens connections for a [`ConnectionConfig`]; [`Connection`] is
//! the shared handle statements run against. Handles are used concurrently
//! from several tasks, so any pooling or serialization lives behind them.

use crate::config::ConnectionConfig;
use crate::error::OrmResult;
use crate::models::Value;
use std::future::Future;

/// Result of a single executed statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}

/// How batch statements carry their values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindStyle {
    /// `(?, ?), (?, ?)` with every value bound as a parameter
    #[default]
    Parameters,
    /// Escaped inline literals, for engines without multi-row binding
    Literals,
}

pub trait Connection: Send + Sync + 'static {
    /// Liveness probe.
    fn ping(&self) -> impl Future<Output = OrmResult<()>> + Send;

    /// Execute one statement with positional `?` parameters.
    fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = OrmResult<ExecOutcome>> + Send;

    fn bind_style(&self) -> BindStyle {
        BindStyle::Parameters
    }
}

pub trait Driver: Send + Sync + 'static {
    type Conn: Connection;

    /// Driver kind, used in logs.
    const NAME: &'static str;

    /// Data source name handed to the engine for `config`.
    ///
    /// Defaults to `user:password@tcp(host:port)/dbname?charset=<charset>`.
    fn data_source_name(&self, config: &ConnectionConfig) -> OrmResult<String> {
        Ok(config.data_source_name())
    }

    /// Establish a connection handle.
    fn open(&self, config: &ConnectionConfig)
    -> impl Future<Output = OrmResult<Self::Conn>> + Send;
}
