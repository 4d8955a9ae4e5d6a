//! Query Executor — runs one parameterized statement and returns its rows.
//!
//! Rows are opaque JSON objects; the executor knows nothing about resumes.
//! `AppState` holds an `Arc<dyn QueryExecutor>`, so the aggregation path can be
//! driven by an in-memory fake in tests.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod postgres;

#[cfg(test)]
pub mod fake;

pub use postgres::PgQueryExecutor;

/// One result row, column name → value.
pub type Row = Map<String, Value>;

/// A positional statement argument. Always bound, never spliced into SQL text.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum QueryArg {
    Int(i64),
    IntArray(Vec<i64>),
    Text(String),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("no database connection became available")]
    PoolExhausted,

    #[error("statement exceeded the {0:?} timeout")]
    Timeout(Duration),

    #[error("statement rejected: {0}")]
    Rejected(sqlx::Error),

    #[error("unusable row data: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for QueryError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => QueryError::PoolExhausted,
            other => QueryError::Rejected(other),
        }
    }
}

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Acquires a connection, runs `statement` with `args` bound as `$1..$n`,
    /// and releases the connection on every exit path.
    async fn execute(&self, statement: &str, args: &[QueryArg]) -> Result<Vec<Row>, QueryError>;
}
