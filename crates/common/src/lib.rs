//! Common utilities shared by every Brewery service crate.
//!
//! This crate provides:
//! - Layered configuration loading
//! - Tracing bootstrap
//! - Zone-offset aware date-time helpers
//! - Pagination and sorting types

pub mod config;
pub mod datetime;
pub mod pagination;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AppConfig, StorageBackend};
pub use datetime::{now_local, offset_from_seconds};
pub use pagination::{PaginatedResult, PaginationParams, SortDirection, SortParams};
pub use telemetry::init_tracing;

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
