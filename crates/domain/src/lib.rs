//! Brewery Domain Types
//!
//! This crate provides the core domain model for the brewery service: the
//! persisted `Beer` record, its strongly-typed identifier, and the closed set
//! of beer styles that the wire representation is restricted to.
//!
//! ## Architecture
//!
//! - **identifiers**: UUID-based `BeerId`
//! - **beer**: the `Beer` entity and the `BeerStyle` enumeration
//! - **errors**: domain error types
//!
//! ## Usage
//!
//! ```rust
//! use brewery_domain::{BeerId, BeerStyle};
//!
//! let id = BeerId::new();
//! assert_ne!(id.to_string(), "");
//!
//! let style: BeerStyle = "PALE_ALE".parse().unwrap();
//! assert_eq!(style, BeerStyle::PaleAle);
//! assert_eq!(style.as_str(), "PALE_ALE");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod beer;
pub mod errors;
pub mod identifiers;

pub use beer::{Beer, BeerStyle};
pub use errors::{DomainError, DomainResult};
pub use identifiers::BeerId;
