//! Repository doubles for exercising the service without a database.

use async_trait::async_trait;
use brewery_application::{ApplicationError, BeerRepositoryPort};
use brewery_domain::{Beer, BeerId};
use parking_lot::RwLock;
use std::sync::Arc;

pub use brewery_infrastructure::InMemoryBeerRepository;

/// A store that is never reachable
pub struct UnavailableBeerRepository {
    reason: String,
}

impl UnavailableBeerRepository {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> ApplicationError {
        ApplicationError::StorageUnavailable(self.reason.clone())
    }
}

impl Default for UnavailableBeerRepository {
    fn default() -> Self {
        Self::new("connection refused")
    }
}

#[async_trait]
impl BeerRepositoryPort for UnavailableBeerRepository {
    async fn get_by_id(&self, _id: BeerId) -> Result<Option<Beer>, ApplicationError> {
        Err(self.error())
    }

    async fn save(&self, _beer: Beer) -> Result<Beer, ApplicationError> {
        Err(self.error())
    }

    async fn exists(&self, _id: BeerId) -> Result<bool, ApplicationError> {
        Err(self.error())
    }
}

/// In-memory store that records every entity handed to `save`
pub struct RecordingBeerRepository {
    inner: InMemoryBeerRepository,
    saved: Arc<RwLock<Vec<Beer>>>,
}

impl RecordingBeerRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryBeerRepository::default(),
            saved: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Entities as received by `save`, before the store stamped them
    pub fn saved(&self) -> Vec<Beer> {
        self.saved.read().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saved.read().len()
    }

    pub fn inner(&self) -> &InMemoryBeerRepository {
        &self.inner
    }

    pub fn clear(&self) {
        self.saved.write().clear();
    }
}

impl Default for RecordingBeerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BeerRepositoryPort for RecordingBeerRepository {
    async fn get_by_id(&self, id: BeerId) -> Result<Option<Beer>, ApplicationError> {
        self.inner.get_by_id(id).await
    }

    async fn save(&self, beer: Beer) -> Result<Beer, ApplicationError> {
        self.saved.write().push(beer.clone());
        self.inner.save(beer).await
    }

    async fn exists(&self, id: BeerId) -> Result<bool, ApplicationError> {
        self.inner.exists(id).await
    }
}
