//! Beer Service
//!
//! Fetch-map-return and map-store flows for the beer resource.

use super::ServiceContext;
use crate::dto::BeerDto;
use crate::mappers::BeerMapper;
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use brewery_domain::{Beer, BeerId};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

/// Beer repository trait (to be implemented by infrastructure)
///
/// `save` owns identity and audit fields:
/// - a beer without `id` is inserted with a fresh id, version 0 and both
///   timestamps set to now;
/// - a beer with `id` replaces the stored record, bumping the version and
///   refreshing `last_modified_date`, or fails with `NotFound` when no record
///   exists. It never inserts.
#[async_trait]
pub trait BeerRepositoryPort: Send + Sync {
    async fn get_by_id(&self, id: BeerId) -> Result<Option<Beer>, ApplicationError>;
    async fn save(&self, beer: Beer) -> Result<Beer, ApplicationError>;
    async fn exists(&self, id: BeerId) -> Result<bool, ApplicationError>;
}

/// Beer service implementation
pub struct BeerService<R>
where
    R: BeerRepositoryPort + ?Sized,
{
    repository: Arc<R>,
    mapper: BeerMapper,
}

impl<R> BeerService<R>
where
    R: BeerRepositoryPort + ?Sized,
{
    pub fn new(repository: Arc<R>, mapper: BeerMapper) -> Self {
        Self { repository, mapper }
    }

    /// Get a beer by ID
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id, beer_id = %id))]
    pub async fn get_by_id(&self, ctx: &ServiceContext, id: BeerId) -> ApplicationResult<BeerDto> {
        let beer = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::beer_not_found(id))?;

        self.mapper.to_dto(&beer)
    }

    /// Create a new beer.
    ///
    /// Client-supplied identity, version and timestamps are discarded; the
    /// returned DTO carries the values the store assigned.
    #[instrument(skip(self, ctx, dto), fields(correlation_id = %ctx.correlation_id))]
    pub async fn create(&self, ctx: &ServiceContext, dto: BeerDto) -> ApplicationResult<BeerDto> {
        dto.validate()?;

        let beer = self.mapper.to_entity(&dto).without_identity();
        let saved = self.repository.save(beer).await?;

        let id = saved
            .id
            .ok_or_else(|| ApplicationError::Internal("Store returned a beer without id".to_string()))?;
        info!(beer_id = %id, "Beer created");

        self.mapper.to_dto(&saved)
    }

    /// Update an existing beer. Never creates one.
    #[instrument(skip(self, ctx, dto), fields(correlation_id = %ctx.correlation_id, beer_id = %id))]
    pub async fn update(&self, ctx: &ServiceContext, id: BeerId, dto: BeerDto) -> ApplicationResult<()> {
        dto.validate()?;

        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::beer_not_found(id))?;

        let saved = self
            .repository
            .save(self.mapper.apply_update(existing, &dto))
            .await?;

        info!(version = ?saved.version, "Beer updated");
        Ok(())
    }

    /// Probe the store with a single cheap round trip
    #[instrument(skip(self))]
    pub async fn is_ready(&self) -> ApplicationResult<()> {
        let probe = BeerId::from_uuid(uuid::Uuid::nil());
        let found = self.repository.exists(probe).await?;
        debug!(found, "Store readiness probe answered");
        Ok(())
    }
}
