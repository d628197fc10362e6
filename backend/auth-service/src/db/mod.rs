use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

/// Create the PostgreSQL pool described by the configuration.
///
/// Connecting acquires an initial connection, which doubles as a liveness
/// check on the database.
pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connection_pool)
        .min_connections(config.max_connection_pool / 2)
        .max_lifetime(Duration::from_secs(3600))
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.db_connection_url)
        .await
}

/// Data access layer for authentication records.
pub struct AuthRepository {
    pool: PgPool,
}

impl AuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Handle to the underlying pool, exposed for tests.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// TODO: repository methods once the user schema lands:
// - create_user
// - find_user_by_email
// - update_user
// - delete_user
// - validate_credentials
