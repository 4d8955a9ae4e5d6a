use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use jsonwebtoken::Algorithm;

use crate::auth::parse_algorithm;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or invalid.
#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub database: DatabaseConfig,
    pub query_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub pool_size: u32,
    pub acquire_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let jwt_secret = require_env("API_JWT_SECRET")?;
        if jwt_secret.is_empty() {
            anyhow::bail!("API_JWT_SECRET must not be empty");
        }
        let jwt_algorithm = parse_algorithm(&require_env("API_JWT_ALGORITHM")?)?;

        Ok(Config {
            jwt_secret,
            jwt_algorithm,
            database: DatabaseConfig {
                host: require_env("DATABASE_HOST")?,
                port: parse_env("DATABASE_PORT", 5432)?,
                username: require_env("DATABASE_USERNAME")?,
                password: require_env("DATABASE_PASSWORD")?,
                name: require_env("DATABASE_NAME")?,
                pool_size: parse_env("DATABASE_POOL_SIZE", 5)?,
                acquire_timeout: Duration::from_secs(parse_env(
                    "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    30,
                )?),
            },
            query_timeout: Duration::from_secs(parse_env("QUERY_TIMEOUT_SECS", 30)?),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("database", &self.database)
            .field("query_timeout", &self.query_timeout)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("pool_size", &self.pool_size)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}
