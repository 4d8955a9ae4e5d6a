use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Creates the process-wide PostgreSQL connection pool.
///
/// Acquisition beyond `pool_size` queues until a connection is released or
/// `acquire_timeout` elapses.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    info!(
        "Connecting to PostgreSQL at {}:{}/{} (pool size {})",
        config.host, config.port, config.name, config.pool_size
    );

    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.name);

    let pool = PgPoolOptions::new()
        .max_connections(config.pool_size)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Drains the pool: waits for checked-out connections to come back, then closes them.
pub async fn close_pool(pool: &PgPool) {
    info!("Draining PostgreSQL connection pool ({} open)", pool.size());
    pool.close().await;
    info!("PostgreSQL connection pool closed");
}
