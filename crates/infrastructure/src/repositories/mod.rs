//! Repository implementations for data persistence.
//!
//! Both beer stores implement the application's `BeerRepositoryPort` plus the
//! pageable listing capability below.

mod beer_repository;

pub use beer_repository::*;

use async_trait::async_trait;
use brewery_common::pagination::{PaginatedResult, PaginationParams, SortParams};

/// Pageable, sortable listing over a store.
#[async_trait]
pub trait PagedRepository<T>: Send + Sync {
    /// Fetch one page of entities in the requested order.
    async fn find_page(
        &self,
        pagination: PaginationParams,
        sort: SortParams,
    ) -> crate::Result<PaginatedResult<T>>;

    /// Count all stored entities.
    async fn count(&self) -> crate::Result<u64>;
}
