//! In-memory `QueryExecutor` for tests.
//!
//! Understands the two statement shapes the feed issues (`select * from <table>`
//! with an optional `resume_id = any($1)` filter), applies the filter the way
//! the store would, and models a bounded pool with a semaphore so tests can
//! observe peak and outstanding acquisitions.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Semaphore;

use super::{QueryArg, QueryError, QueryExecutor, Row};

pub struct FakeExecutor {
    tables: HashMap<String, Vec<Row>>,
    failing: HashSet<String>,
    delay: Duration,
    pool: Semaphore,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    log: Mutex<Vec<(String, Vec<QueryArg>)>>,
}

/// Decrements the outstanding count however `execute` exits.
struct Checkout<'a>(&'a AtomicUsize);

impl Drop for Checkout<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FakeExecutor {
    pub fn new(pool_size: usize) -> Self {
        Self {
            tables: HashMap::new(),
            failing: HashSet::new(),
            delay: Duration::ZERO,
            pool: Semaphore::new(pool_size),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_table(mut self, table: &str, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .map(|v| match v {
                Value::Object(map) => map,
                other => panic!("fake rows must be objects, got {other}"),
            })
            .collect();
        self.tables.insert(table.to_string(), rows);
        self
    }

    pub fn failing_on(mut self, table: &str) -> Self {
        self.failing.insert(table.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn statements(&self) -> Vec<(String, Vec<QueryArg>)> {
        self.log.lock().unwrap().clone()
    }
}

fn table_name(statement: &str) -> Option<&str> {
    let mut words = statement.split_whitespace();
    while let Some(word) = words.next() {
        if word.eq_ignore_ascii_case("from") {
            return words.next();
        }
    }
    None
}

#[async_trait]
impl QueryExecutor for FakeExecutor {
    async fn execute(&self, statement: &str, args: &[QueryArg]) -> Result<Vec<Row>, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log
            .lock()
            .unwrap()
            .push((statement.to_string(), args.to_vec()));

        let _permit = self
            .pool
            .acquire()
            .await
            .map_err(|_| QueryError::PoolExhausted)?;
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _checkout = Checkout(&self.in_flight);
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let table = table_name(statement)
            .ok_or_else(|| QueryError::Rejected(sqlx::Error::Protocol("no table".into())))?;
        if self.failing.contains(table) {
            return Err(QueryError::Rejected(sqlx::Error::Protocol(format!(
                "relation \"{table}\" does not exist"
            ))));
        }

        let rows = self.tables.get(table).cloned().unwrap_or_default();
        let rows = match args.first() {
            Some(QueryArg::IntArray(keys)) => rows
                .into_iter()
                .filter(|row| {
                    row.get("resume_id")
                        .and_then(Value::as_i64)
                        .is_some_and(|fk| keys.contains(&fk))
                })
                .collect(),
            _ => rows,
        };
        Ok(rows)
    }
}
