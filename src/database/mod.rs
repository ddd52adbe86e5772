use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Errors from pool construction and connectivity checks
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Build the shared connection pool from DATABASE_URL and configuration.
///
/// The pool is created once at startup and injected into the router; no
/// handler reaches for a process-wide connection.
pub async fn connect() -> Result<MySqlPool, DatabaseError> {
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;
    connect_to(&url).await
}

/// Build a pool against an explicit URL (tests use this directly).
pub async fn connect_to(url: &str) -> Result<MySqlPool, DatabaseError> {
    let db_config = &crate::config::config().database;

    let pool = MySqlPoolOptions::new()
        .max_connections(db_config.max_connections)
        .acquire_timeout(Duration::from_secs(db_config.acquire_timeout_secs))
        .connect(url)
        .await?;

    info!("Created database pool (max_connections={})", db_config.max_connections);
    Ok(pool)
}

/// Pings the pool to ensure connectivity
pub async fn health_check(pool: &MySqlPool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_names_the_variable() {
        let err = DatabaseError::ConfigMissing("DATABASE_URL");
        assert_eq!(err.to_string(), "Missing configuration: DATABASE_URL");
    }
}
