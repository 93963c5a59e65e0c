//! Infrastructure layer for the Brewery service
//!
//! This crate provides implementations for:
//! - Database access (PostgreSQL with sqlx)
//! - Beer store adapters behind the application's `BeerRepositoryPort`
//!
//! ## Architecture
//!
//! The infrastructure layer follows the repository pattern, providing concrete
//! implementations of data access that can be swapped for testing or different
//! storage backends.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brewery_infrastructure::{
//!     database::{DatabaseConfig, DatabasePool},
//!     repositories::PgBeerRepository,
//! };
//!
//! let pool = DatabasePool::new(&DatabaseConfig::test_config(url)).await?;
//! pool.migrate().await?;
//!
//! let beer_repo = PgBeerRepository::new(pool.pool().clone(), offset);
//! ```

pub mod database;
pub mod repositories;

// Re-export commonly used types
pub use database::{DatabaseConfig, DatabasePool, HealthStatus};
pub use repositories::{BeerSortField, InMemoryBeerRepository, PagedRepository, PgBeerRepository};

use brewery_application::ApplicationError;

// Re-export result and error types
pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database errors from sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Stored data that cannot be turned back into an entity
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

impl From<Error> for ApplicationError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(msg) => ApplicationError::NotFound(msg),
            Error::Database(e) => ApplicationError::StorageUnavailable(e.to_string()),
            Error::Configuration(msg) | Error::CorruptRecord(msg) => ApplicationError::Internal(msg),
        }
    }
}
