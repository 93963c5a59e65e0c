//! PostgreSQL test database setup.
//!
//! Integration tests that need a real database read its URL from
//! `TEST_DATABASE_URL` and are marked `#[ignore]`.

use brewery_infrastructure::{DatabaseConfig, DatabasePool};
use sqlx::PgPool;

/// Environment variable holding the test database URL
pub const TEST_DATABASE_URL: &str = "TEST_DATABASE_URL";

/// Test database wrapper with the beer schema applied
pub struct TestDatabase {
    pool: DatabasePool,
}

impl TestDatabase {
    /// Connect to the database at `TEST_DATABASE_URL`, if set
    pub async fn from_env() -> anyhow::Result<Option<Self>> {
        match std::env::var(TEST_DATABASE_URL) {
            Ok(url) => Ok(Some(Self::new_with_url(&url).await?)),
            Err(_) => Ok(None),
        }
    }

    /// Connect and apply migrations
    pub async fn new_with_url(connection_string: &str) -> anyhow::Result<Self> {
        let config = DatabaseConfig::test_config(connection_string.to_string());
        let pool = DatabasePool::new(&config).await?;
        pool.migrate().await?;
        Ok(Self { pool })
    }

    /// Get a reference to the database pool
    pub fn pool(&self) -> &PgPool {
        self.pool.pool()
    }

    /// Remove every beer for test isolation
    pub async fn clean(&self) -> anyhow::Result<()> {
        sqlx::query("TRUNCATE TABLE beer").execute(self.pool()).await?;
        Ok(())
    }
}
