use std::time::Duration;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;

use super::{QueryArg, QueryError, QueryExecutor, Row};

/// Runs statements against the shared PostgreSQL pool.
///
/// Every statement is wrapped in `json_agg` so any row shape decodes into
/// JSON objects. Integer columns stay exact JSON integers.
#[derive(Clone)]
pub struct PgQueryExecutor {
    pool: PgPool,
    timeout: Duration,
}

impl PgQueryExecutor {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

/// Wraps a row-returning statement so it yields a single JSON array.
fn wrap_as_json(statement: &str) -> String {
    format!("SELECT COALESCE(json_agg(t), '[]'::json) FROM ({statement}) AS t")
}

#[async_trait]
impl QueryExecutor for PgQueryExecutor {
    async fn execute(&self, statement: &str, args: &[QueryArg]) -> Result<Vec<Row>, QueryError> {
        let sql = wrap_as_json(statement);
        let mut query = sqlx::query_scalar::<_, Json<Vec<Row>>>(&sql);
        for arg in args {
            query = match arg {
                QueryArg::Int(v) => query.bind(*v),
                QueryArg::IntArray(v) => query.bind(v.clone()),
                QueryArg::Text(v) => query.bind(v.clone()),
            };
        }

        // Dropped on every return below, which hands the connection back.
        let mut conn = self.pool.acquire().await?;

        let Json(rows) = tokio::time::timeout(self.timeout, query.fetch_one(&mut *conn))
            .await
            .map_err(|_| QueryError::Timeout(self.timeout))??;

        debug!(rows = rows.len(), "statement completed");
        Ok(rows)
    }
}
