//! Integration tests for the beer stores.
//!
//! PostgreSQL cases run only with `TEST_DATABASE_URL` set:
//! `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`

use brewery_application::{ApplicationError, BeerRepositoryPort};
use brewery_common::pagination::{PaginationParams, SortParams};
use brewery_domain::BeerId;
use brewery_infrastructure::{InMemoryBeerRepository, PagedRepository, PgBeerRepository};
use brewery_testing::{builders::*, database::TestDatabase, fixtures::*};
use chrono::{FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

#[tokio::test]
async fn test_in_memory_concurrent_updates_serialize_versions() {
    let repo = Arc::new(InMemoryBeerRepository::default());
    let created = repo.save(create_test_beer()).await.unwrap();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let repo = Arc::clone(&repo);
            let update = BeerBuilder::new()
                .with_id(created.id.unwrap())
                .with_name(format!("Batch {}", i))
                .build();
            tokio::spawn(async move { repo.save(update).await })
        })
        .collect();

    let mut versions = Vec::new();
    for handle in handles {
        versions.push(handle.await.unwrap().unwrap().version.unwrap());
    }
    versions.sort_unstable();

    assert_eq!(versions, (1..=16).collect::<Vec<_>>());
    let stored = repo.get_by_id(created.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(stored.version, Some(16));
    assert_eq!(stored.created_date, created.created_date);
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_in_memory_paging_walks_all_beers() {
    let repo = InMemoryBeerRepository::default();
    for beer in create_test_beers(7) {
        repo.save(beer).await.unwrap();
    }

    let mut seen = Vec::new();
    for page in 1..=3 {
        let result = repo
            .find_page(PaginationParams::new(page, 3), SortParams::asc("upc"))
            .await
            .unwrap();
        assert_eq!(result.total, 7);
        assert_eq!(result.total_pages, 3);
        seen.extend(result.items.into_iter().map(|b| b.upc));
    }

    assert_eq!(seen.len(), 7);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(repo.count().await.unwrap(), 7);
}

#[tokio::test]
async fn test_in_memory_store_clock_uses_offset() {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let repo = InMemoryBeerRepository::new(offset);

    let saved = repo.save(create_test_beer()).await.unwrap();
    let expected = Utc::now().with_timezone(&offset).naive_local();
    let drift = (expected - saved.created_date.unwrap()).num_seconds().abs();
    assert!(drift < 60, "store clock drifted {}s from local time", drift);
}

async fn pg_repository() -> (TestDatabase, PgBeerRepository) {
    let db = TestDatabase::from_env()
        .await
        .unwrap()
        .expect("TEST_DATABASE_URL must be set");
    db.clean().await.unwrap();
    let repo = PgBeerRepository::new(db.pool().clone(), Utc.fix());
    (db, repo)
}

#[tokio::test]
#[ignore] // Requires PostgreSQL at TEST_DATABASE_URL
async fn test_pg_insert_and_fetch_preserves_exact_price() {
    let (_db, repo) = pg_repository().await;

    let beer = BeerBuilder::new()
        .with_price(Decimal::new(1_234_567_891, 4))
        .build();
    let saved = repo.save(beer).await.unwrap();
    let id = saved.id.unwrap();

    assert_eq!(saved.version, Some(0));
    assert_eq!(saved.created_date, saved.last_modified_date);

    let fetched = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(fetched.price, Decimal::new(1_234_567_891, 4));
    assert_eq!(fetched.beer_name, "Nice Ale");
    assert!(repo.exists(id).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL at TEST_DATABASE_URL
async fn test_pg_replace_bumps_version_and_never_upserts() {
    let (_db, repo) = pg_repository().await;

    let saved = repo.save(create_test_beer()).await.unwrap();
    let replaced = repo
        .save(
            BeerBuilder::new()
                .with_id(saved.id.unwrap())
                .with_name("Replaced")
                .build(),
        )
        .await
        .unwrap();

    assert_eq!(replaced.version, Some(1));
    assert_eq!(replaced.created_date, saved.created_date);
    assert!(replaced.last_modified_date >= saved.last_modified_date);

    let missing = BeerBuilder::new().with_id(BeerId::new()).build();
    let err = repo.save(missing).await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
#[ignore] // Requires PostgreSQL at TEST_DATABASE_URL
async fn test_pg_paging_sorts_by_name() {
    let (_db, repo) = pg_repository().await;
    for name in ["Stout Surprise", "Amber Dawn", "Mango Gose"] {
        repo.save(BeerBuilder::new().with_name(name).build())
            .await
            .unwrap();
    }

    let page = repo
        .find_page(PaginationParams::new(1, 2), SortParams::desc("beerName"))
        .await
        .unwrap();

    let names: Vec<_> = page.items.iter().map(|b| b.beer_name.as_str()).collect();
    assert_eq!(names, vec!["Stout Surprise", "Mango Gose"]);
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
#[ignore] // Requires PostgreSQL at TEST_DATABASE_URL
async fn test_pg_undecodable_row_is_internal_not_unavailable() {
    let (db, repo) = pg_repository().await;
    let id = BeerId::new();

    // Beyond the range of an exact decimal
    sqlx::query(
        "INSERT INTO beer (id, version, created_date, last_modified_date, beer_name, beer_style, upc, price) \
         VALUES ($1, 0, now(), now(), 'Huge Ale', 'ALE', 1, 1e40)",
    )
    .bind(id.into_uuid())
    .execute(db.pool())
    .await
    .unwrap();

    let err = repo.get_by_id(id).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Internal(_)), "{:?}", err);
    assert!(!err.is_retryable());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL at TEST_DATABASE_URL
async fn test_pg_replace_at_max_version_is_internal() {
    let (db, repo) = pg_repository().await;
    let saved = repo.save(create_test_beer()).await.unwrap();
    let id = saved.id.unwrap();

    sqlx::query("UPDATE beer SET version = $2 WHERE id = $1")
        .bind(id.into_uuid())
        .bind(i32::MAX)
        .execute(db.pool())
        .await
        .unwrap();

    let err = repo
        .save(BeerBuilder::new().with_id(id).build())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Internal(_)), "{:?}", err);

    let stored = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.version, Some(i32::MAX));
}
