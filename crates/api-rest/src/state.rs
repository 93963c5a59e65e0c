//! Application state and dependency injection.
//!
//! Composition is explicit: a store is wrapped in a [`BeerService`], the
//! service is placed in [`AppState`], and the state is handed to the router.

use anyhow::Context;
use async_trait::async_trait;
use brewery_application::{
    ApplicationError, BeerDto, BeerMapper, BeerRepositoryPort, BeerService, ServiceContext,
};
use brewery_common::{AppConfig, StorageBackend};
use brewery_domain::BeerId;
use brewery_infrastructure::{
    DatabaseConfig, DatabasePool, InMemoryBeerRepository, PgBeerRepository,
};
use chrono::FixedOffset;
use std::sync::Arc;
use tracing::info;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Beer service (type-erased)
    pub beer_service: Arc<dyn BeerServiceTrait>,
}

impl AppState {
    /// Create application state around a service implementation
    pub fn new<S>(beer_service: S) -> Self
    where
        S: BeerServiceTrait + 'static,
    {
        Self {
            beer_service: Arc::new(beer_service),
        }
    }

    /// Create application state backed by a process-local store
    ///
    /// Suitable for development and testing.
    pub fn in_memory(offset: FixedOffset) -> Self {
        let repository = Arc::new(InMemoryBeerRepository::new(offset));
        Self::new(BeerService::new(repository, BeerMapper::new(offset)))
    }

    /// Build the store selected by `storage.backend` and wrap it in the service
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let offset = config.zone_offset()?;

        match config.storage.backend {
            StorageBackend::Memory => {
                info!(%offset, "Using in-memory beer store");
                Ok(Self::in_memory(offset))
            }
            StorageBackend::Postgres => {
                let db_config = DatabaseConfig::from_storage(&config.storage)?;
                let pool = DatabasePool::new(&db_config)
                    .await
                    .context("Failed to connect to PostgreSQL")?;
                pool.migrate().await.context("Failed to apply beer schema")?;

                let health = pool.health_check().await;
                if !health.healthy {
                    anyhow::bail!(
                        "PostgreSQL is unhealthy: {}",
                        health.error.unwrap_or_default()
                    );
                }

                info!(
                    %offset,
                    latency_ms = health.latency.as_millis() as u64,
                    pool_size = health.pool_size,
                    "Using PostgreSQL beer store"
                );
                let repository = Arc::new(PgBeerRepository::new(pool.pool().clone(), offset));
                Ok(Self::new(BeerService::new(repository, BeerMapper::new(offset))))
            }
        }
    }
}

// ============================================================================
// SERVICE TRAITS (Type-erased interfaces for route handlers)
// ============================================================================

/// Type-erased beer service trait
#[async_trait]
pub trait BeerServiceTrait: Send + Sync {
    /// Fetch one beer
    async fn get_by_id(&self, ctx: &ServiceContext, id: BeerId)
        -> Result<BeerDto, ApplicationError>;

    /// Create a beer, returning it with its assigned identity
    async fn create(&self, ctx: &ServiceContext, dto: BeerDto)
        -> Result<BeerDto, ApplicationError>;

    /// Update an existing beer
    async fn update(
        &self,
        ctx: &ServiceContext,
        id: BeerId,
        dto: BeerDto,
    ) -> Result<(), ApplicationError>;

    /// Check that the store answers
    async fn is_ready(&self) -> Result<(), ApplicationError>;
}

#[async_trait]
impl<R> BeerServiceTrait for BeerService<R>
where
    R: BeerRepositoryPort + ?Sized + 'static,
{
    async fn get_by_id(
        &self,
        ctx: &ServiceContext,
        id: BeerId,
    ) -> Result<BeerDto, ApplicationError> {
        BeerService::get_by_id(self, ctx, id).await
    }

    async fn create(&self, ctx: &ServiceContext, dto: BeerDto) -> Result<BeerDto, ApplicationError> {
        BeerService::create(self, ctx, dto).await
    }

    async fn update(
        &self,
        ctx: &ServiceContext,
        id: BeerId,
        dto: BeerDto,
    ) -> Result<(), ApplicationError> {
        BeerService::update(self, ctx, id, dto).await
    }

    async fn is_ready(&self) -> Result<(), ApplicationError> {
        BeerService::is_ready(self).await
    }
}
