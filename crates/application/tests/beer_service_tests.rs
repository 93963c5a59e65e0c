//! Tests for beer service
//!
//! Exercises create, read and update against the in-memory store.

use brewery_application::{ApplicationError, BeerMapper, BeerService, ServiceContext};
use brewery_domain::{BeerId, BeerStyle};
use brewery_testing::{
    builders::*, fixtures::*, InMemoryBeerRepository, RecordingBeerRepository,
    UnavailableBeerRepository,
};
use chrono::FixedOffset;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

fn service() -> (BeerService<InMemoryBeerRepository>, Arc<InMemoryBeerRepository>) {
    let repo = Arc::new(InMemoryBeerRepository::default());
    (BeerService::new(Arc::clone(&repo), BeerMapper::default()), repo)
}

fn ctx() -> ServiceContext {
    ServiceContext::new("test-correlation-id")
}

#[tokio::test]
async fn test_create_then_get_returns_stored_beer() {
    let (service, _) = service();

    let created = service.create(&ctx(), valid_beer_dto()).await.unwrap();
    let id = created.id.expect("created beer has an id");

    assert_eq!(created.version, Some(0));
    assert!(created.created_date.is_some());
    assert_eq!(created.created_date, created.last_modified_date);

    let fetched = service.get_by_id(&ctx(), BeerId::from_uuid(id)).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.beer_name, "Nice Ale");
    assert_eq!(fetched.beer_style, BeerStyle::Ale);
    assert_eq!(fetched.upc, 123123123123);
    assert_eq!(fetched.price, Decimal::new(999, 2));
}

#[tokio::test]
async fn test_create_ignores_client_identity() {
    let repo = Arc::new(RecordingBeerRepository::new());
    let service = BeerService::new(Arc::clone(&repo), BeerMapper::default());

    let forged = BeerDtoBuilder::new().with_forged_identity().build();
    let created = service.create(&ctx(), forged).await.unwrap();

    let saved = repo.saved();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].id.is_none());
    assert!(saved[0].version.is_none());
    assert!(saved[0].created_date.is_none());

    assert_ne!(created.id, Some(Uuid::nil()));
    assert_eq!(created.version, Some(0));
    assert_ne!(
        created.created_date.map(|dt| dt.timestamp()),
        Some(0),
        "epoch timestamp from the request must not survive"
    );
}

#[tokio::test]
async fn test_create_validation_failure_does_not_touch_store() {
    let repo = Arc::new(RecordingBeerRepository::new());
    let service = BeerService::new(Arc::clone(&repo), BeerMapper::default());

    let blank = BeerDtoBuilder::new().with_name("   ").build();
    let err = service.create(&ctx(), blank).await.unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
    assert_eq!(err.http_status(), 400);

    let free = BeerDtoBuilder::new().with_price(Decimal::ZERO).build();
    assert!(service.create(&ctx(), free).await.is_err());

    let no_upc = BeerDtoBuilder::new().with_upc(0).build();
    assert!(service.create(&ctx(), no_upc).await.is_err());

    assert_eq!(repo.save_count(), 0);
}

#[tokio::test]
async fn test_get_unknown_beer_is_not_found() {
    let (service, _) = service();

    let err = service.get_by_id(&ctx(), BeerId::new()).await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn test_update_replaces_fields_and_bumps_version() {
    let (service, _) = service();
    let created = service.create(&ctx(), valid_beer_dto()).await.unwrap();
    let id = BeerId::from_uuid(created.id.unwrap());

    let update = BeerDtoBuilder::new()
        .with_name("Galaxy Cat")
        .with_style(BeerStyle::PaleAle)
        .with_price(Decimal::new(1250, 2))
        .with_quantity_on_hand(42)
        .build();
    service.update(&ctx(), id, update).await.unwrap();

    let fetched = service.get_by_id(&ctx(), id).await.unwrap();
    assert_eq!(fetched.beer_name, "Galaxy Cat");
    assert_eq!(fetched.beer_style, BeerStyle::PaleAle);
    assert_eq!(fetched.price, Decimal::new(1250, 2));
    assert_eq!(fetched.quantity_on_hand, Some(42));
    assert_eq!(fetched.version, Some(1));
    assert_eq!(fetched.created_date, created.created_date);
    assert!(fetched.last_modified_date >= created.last_modified_date);
}

#[tokio::test]
async fn test_update_ignores_client_identity() {
    let (service, repo) = service();
    let created = service.create(&ctx(), valid_beer_dto()).await.unwrap();
    let id = BeerId::from_uuid(created.id.unwrap());

    let forged = BeerDtoBuilder::new()
        .with_name("Renamed")
        .with_forged_identity()
        .build();
    service.update(&ctx(), id, forged).await.unwrap();

    assert_eq!(repo.len(), 1);
    let fetched = service.get_by_id(&ctx(), id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.version, Some(1));
    assert_eq!(fetched.created_date, created.created_date);
}

#[tokio::test]
async fn test_update_keeps_omitted_stock_levels() {
    let (service, _) = service();
    let initial = BeerDtoBuilder::new()
        .with_quantity_to_brew(200)
        .with_min_on_hand(12)
        .build();
    let created = service.create(&ctx(), initial).await.unwrap();
    let id = BeerId::from_uuid(created.id.unwrap());

    service
        .update(&ctx(), id, BeerDtoBuilder::new().with_name("Still Nice").build())
        .await
        .unwrap();

    let fetched = service.get_by_id(&ctx(), id).await.unwrap();
    assert_eq!(fetched.quantity_to_brew, Some(200));
    assert_eq!(fetched.min_on_hand, Some(12));
}

#[tokio::test]
async fn test_update_unknown_beer_never_creates() {
    let (service, repo) = service();

    let err = service
        .update(&ctx(), BeerId::new(), valid_beer_dto())
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(_)));
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_stored_unknown_style_is_unmappable() {
    let (service, repo) = service();
    let id = BeerId::new();
    repo.insert_raw(
        BeerBuilder::new()
            .with_id(id)
            .with_raw_style("SOUR")
            .persisted()
            .build(),
    )
    .unwrap();

    let err = service.get_by_id(&ctx(), id).await.unwrap_err();
    assert_eq!(
        err,
        ApplicationError::UnmappableEnum {
            field: "beerStyle".to_string(),
            value: "SOUR".to_string(),
        }
    );
    assert_eq!(err.error_code(), "UNMAPPABLE_ENUM");
}

#[tokio::test]
async fn test_unavailable_store_surfaces_storage_error() {
    let service = BeerService::new(
        Arc::new(UnavailableBeerRepository::default()),
        BeerMapper::default(),
    );

    let err = service.create(&ctx(), valid_beer_dto()).await.unwrap_err();
    assert!(matches!(err, ApplicationError::StorageUnavailable(_)));
    assert!(err.is_retryable());
    assert_eq!(err.http_status(), 503);

    assert!(service.get_by_id(&ctx(), BeerId::new()).await.is_err());
    assert!(service.is_ready().await.is_err());
}

#[tokio::test]
async fn test_ready_with_empty_store() {
    let (service, _) = service();
    assert!(service.is_ready().await.is_ok());
}

#[tokio::test]
async fn test_timestamps_carry_configured_offset() {
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    let repo = Arc::new(InMemoryBeerRepository::new(offset));
    let service = BeerService::new(repo, BeerMapper::new(offset));

    let created = service.create(&ctx(), valid_beer_dto()).await.unwrap();
    let created_date = created.created_date.unwrap();
    assert_eq!(created_date.offset().local_minus_utc(), 2 * 3600);

    let drift = (chrono::Utc::now().timestamp() - created_date.timestamp()).abs();
    assert!(drift < 60, "wire instant should be close to now, drift {}s", drift);
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let (service, repo) = service();
    let service = Arc::new(service);

    let handles: Vec<_> = create_test_beers(20)
        .into_iter()
        .map(|beer| {
            let service = Arc::clone(&service);
            let dto = BeerDtoBuilder::new()
                .with_name(beer.beer_name)
                .with_upc(beer.upc)
                .build();
            tokio::spawn(async move { service.create(&ServiceContext::internal(), dto).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let created = handle.await.unwrap().unwrap();
        ids.insert(created.id.unwrap());
    }

    assert_eq!(ids.len(), 20);
    assert_eq!(repo.len(), 20);
}
