//! Testing utilities for the Brewery service
//!
//! This crate provides:
//! - Fixtures for the canonical request bodies and entities
//! - Builder patterns for beers and beer DTOs
//! - Failure-injecting and recording repository doubles
//! - PostgreSQL test database setup
//!
//! # Examples
//!
//! ```
//! use brewery_testing::{builders::*, fixtures::*};
//!
//! let dto = valid_beer_dto();
//! assert_eq!(dto.beer_name, "Nice Ale");
//!
//! let beer = BeerBuilder::new().with_name("Galaxy Cat").persisted().build();
//! assert!(beer.id.is_some());
//! ```

pub mod builders;
pub mod database;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
