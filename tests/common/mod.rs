//! In-memory driver used by the integration tests.
//!
//! `FakeDriver` counts open attempts and records the data source names it was
//! given. `FakeConnection` records every executed statement and reports one
//! affected row per VALUES tuple, minus the rows whose id was marked as a
//! duplicate (the count an `INSERT IGNORE` would report).

#![allow(dead_code)]

use lite_orm::config::ConnectionConfig;
use lite_orm::db::{BindStyle, Connection, Driver, ExecOutcome};
use lite_orm::{OrmError, OrmResult, Value, impl_record};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    pub sql: String,
    pub params: Vec<Value>,
}

type FailWhen = Box<dyn Fn(&str, &[Value]) -> bool + Send + Sync>;

pub struct FakeConnection {
    executed: Mutex<Vec<Executed>>,
    pings: AtomicUsize,
    fail_ping: AtomicBool,
    fail_when: Mutex<Option<FailWhen>>,
    next_id: AtomicU64,
    duplicate_ids: Mutex<Vec<u64>>,
    bind_style: BindStyle,
}

impl Default for FakeConnection {
    fn default() -> Self {
        Self::new(BindStyle::Parameters)
    }
}

impl FakeConnection {
    pub fn new(bind_style: BindStyle) -> Self {
        Self {
            executed: Mutex::new(Vec::new()),
            pings: AtomicUsize::new(0),
            fail_ping: AtomicBool::new(false),
            fail_when: Mutex::new(None),
            next_id: AtomicU64::new(0),
            duplicate_ids: Mutex::new(Vec::new()),
            bind_style,
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn executed(&self) -> Vec<Executed> {
        self.executed.lock().unwrap().clone()
    }

    pub fn pings(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }

    pub fn set_fail_ping(&self, fail: bool) {
        self.fail_ping.store(fail, Ordering::SeqCst);
    }

    /// Fail every statement for which `f` returns true.
    pub fn fail_when(&self, f: impl Fn(&str, &[Value]) -> bool + Send + Sync + 'static) {
        *self.fail_when.lock().unwrap() = Some(Box::new(f));
    }

    /// Rows carrying one of `ids` are skipped and not counted as affected.
    pub fn set_duplicate_ids(&self, ids: &[u64]) {
        *self.duplicate_ids.lock().unwrap() = ids.to_vec();
    }

    fn skipped_rows(&self, params: &[Value]) -> u64 {
        let duplicates = self.duplicate_ids.lock().unwrap();
        params
            .iter()
            .filter(|v| matches!(v, Value::UInt(id) if duplicates.contains(id)))
            .count() as u64
    }

    fn should_fail(&self, sql: &str, params: &[Value]) -> bool {
        self.fail_when
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|f| f(sql, params))
    }
}

impl Connection for FakeConnection {
    async fn ping(&self) -> OrmResult<()> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(OrmError::connection(
                "Ping failed: server has gone away",
                "Check that the MySQL server is running and accessible",
            ));
        }
        Ok(())
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> OrmResult<ExecOutcome> {
        tokio::task::yield_now().await;

        self.executed.lock().unwrap().push(Executed {
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        if self.should_fail(sql, params) {
            return Err(OrmError::database(
                "Duplicate entry for key 'PRIMARY'",
                Some("23000".to_string()),
                "Check unique keys",
            ));
        }

        let rows = if sql.contains(" VALUES ") {
            sql.matches("), (").count() as u64 + 1
        } else {
            1
        };
        let rows_affected = rows.saturating_sub(self.skipped_rows(params));
        let last_insert_id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        Ok(ExecOutcome {
            rows_affected,
            last_insert_id,
        })
    }

    fn bind_style(&self) -> BindStyle {
        self.bind_style
    }
}

#[derive(Default)]
struct DriverState {
    attempts: AtomicUsize,
    opens: AtomicUsize,
    fail_open: AtomicBool,
    data_source_names: Mutex<Vec<String>>,
}

#[derive(Clone, Default)]
pub struct FakeDriver {
    state: Arc<DriverState>,
}

impl FakeDriver {
    pub fn attempts(&self) -> usize {
        self.state.attempts.load(Ordering::SeqCst)
    }

    /// Successful opens.
    pub fn opens(&self) -> usize {
        self.state.opens.load(Ordering::SeqCst)
    }

    pub fn set_fail_open(&self, fail: bool) {
        self.state.fail_open.store(fail, Ordering::SeqCst);
    }

    pub fn data_source_names(&self) -> Vec<String> {
        self.state.data_source_names.lock().unwrap().clone()
    }
}

impl Driver for FakeDriver {
    type Conn = FakeConnection;

    const NAME: &'static str = "fake";

    async fn open(&self, config: &ConnectionConfig) -> OrmResult<FakeConnection> {
        self.state.attempts.fetch_add(1, Ordering::SeqCst);
        let dsn = self.data_source_name(config)?;
        self.state.data_source_names.lock().unwrap().push(dsn);

        // Widen the window for racing registrations
        tokio::time::sleep(Duration::from_millis(20)).await;

        if self.state.fail_open.load(Ordering::SeqCst) {
            return Err(OrmError::connection(
                "Failed to connect: connection refused",
                "Check that the MySQL server is running and accessible",
            ));
        }

        self.state.opens.fetch_add(1, Ordering::SeqCst);
        Ok(FakeConnection::default())
    }
}

pub fn config() -> ConnectionConfig {
    ConnectionConfig::new("app", "pw", "localhost", 3306, "shop")
}

pub struct Event {
    pub id: u64,
    pub kind: String,
    pub amount: f64,
}

impl_record!(Event { id, kind, amount });

pub fn events(n: usize) -> Vec<Event> {
    (0..n)
        .map(|i| Event {
            id: i as u64,
            kind: format!("kind-{}", i % 3),
            amount: i as f64 * 1.5,
        })
        .collect()
}
