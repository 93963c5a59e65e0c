//! Transforms between persisted entities and their wire representation.

mod beer;

pub use beer::BeerMapper;
