//! Postgres connection pool.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Type alias for the shared Postgres pool used across the whole application.
pub type DbPool = PgPool;

/// Pool settings for the employee store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Pool ceiling.
    pub max_connections: u32,
    /// How long a caller waits for a connection before the store reports an error.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Create a new connection pool from the given `database_url`.
///
/// Fails once `acquire_timeout` elapses without a usable connection.
pub async fn create_pool(database_url: &str, settings: PoolSettings) -> Result<DbPool, DbError> {
    info!(
        max_connections = settings.max_connections,
        acquire_timeout_ms = settings.acquire_timeout.as_millis() as u64,
        "Connecting to employee database"
    );
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Apply the embedded `employees` migrations from the workspace `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("Applying employee table migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = PoolSettings::default();
        assert_eq!(settings.max_connections, 10);
        assert_eq!(settings.acquire_timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn unreachable_database_fails_within_the_acquire_timeout() {
        let settings = PoolSettings {
            max_connections: 1,
            acquire_timeout: Duration::from_millis(300),
        };
        // Port 1 is never a Postgres listener.
        let result = tokio::time::timeout(
            Duration::from_secs(10),
            create_pool("postgres://postgres@127.0.0.1:1/employees", settings),
        )
        .await
        .expect("pool creation should give up on its own");
        assert!(matches!(result, Err(DbError::Sqlx(_))));
    }
}
