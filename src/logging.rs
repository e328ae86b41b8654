//! Tracing subscriber setup for applications embedding lite-orm.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the application. [`LogOptions`] can be flattened into a clap CLI.

use clap::Args;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Args)]
pub struct LogOptions {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info", env = "ORM_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "ORM_JSON_LOGS")]
    pub json_logs: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl LogOptions {
    /// Install the global subscriber. Fails if one is already installed.
    pub fn init(&self) -> Result<(), TryInitError> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let subscriber = tracing_subscriber::registry().with(filter);

        if self.json_logs {
            subscriber.with(fmt::layer().json()).try_init()
        } else {
            subscriber
                .with(fmt::layer().with_target(true).with_thread_ids(false))
                .try_init()
        }
    }
}
