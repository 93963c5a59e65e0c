//! Data Transfer Objects (DTOs) for the API layer
//!
//! DTOs provide a stable API contract separate from the persisted entity.
//! They carry serialization, validation annotations and API documentation.

mod beer;

pub use beer::*;
