//! Beer repository implementations.
//!
//! `InMemoryBeerRepository` keeps beers in a process-local map;
//! `PgBeerRepository` persists them in the `beer` table. Both own identity,
//! version and audit timestamps as described on `BeerRepositoryPort`.

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};
use parking_lot::RwLock;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use brewery_application::{ApplicationError, BeerRepositoryPort};
use brewery_common::datetime::now_local;
use brewery_common::pagination::{PaginatedResult, PaginationParams, SortDirection, SortParams};
use brewery_domain::{Beer, BeerId};

use super::PagedRepository;
use crate::{Error, Result};

/// SQLSTATE raised when `version + 1` leaves the INTEGER range
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

const BEER_COLUMNS: &str = "id, version, created_date, last_modified_date, beer_name, beer_style, \
                            upc, price, quantity_on_hand, quantity_to_brew, min_on_hand";

/// Fields a beer listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeerSortField {
    BeerName,
    BeerStyle,
    Upc,
    Price,
    QuantityOnHand,
    CreatedDate,
    LastModifiedDate,
}

impl BeerSortField {
    /// Resolve a wire or column name; anything unknown sorts by creation date.
    pub fn from_name(name: &str) -> Self {
        match name {
            "beerName" | "beer_name" => Self::BeerName,
            "beerStyle" | "beer_style" => Self::BeerStyle,
            "upc" => Self::Upc,
            "price" => Self::Price,
            "quantityOnHand" | "quantity_on_hand" => Self::QuantityOnHand,
            "lastModifiedDate" | "last_modified_date" => Self::LastModifiedDate,
            _ => Self::CreatedDate,
        }
    }

    /// Column this field is stored in
    pub fn column(&self) -> &'static str {
        match self {
            Self::BeerName => "beer_name",
            Self::BeerStyle => "beer_style",
            Self::Upc => "upc",
            Self::Price => "price",
            Self::QuantityOnHand => "quantity_on_hand",
            Self::CreatedDate => "created_date",
            Self::LastModifiedDate => "last_modified_date",
        }
    }

    /// Ascending comparison, ties broken by id for a stable page order
    pub fn compare(&self, a: &Beer, b: &Beer) -> Ordering {
        let primary = match self {
            Self::BeerName => a.beer_name.cmp(&b.beer_name),
            Self::BeerStyle => a.beer_style.cmp(&b.beer_style),
            Self::Upc => a.upc.cmp(&b.upc),
            Self::Price => a.price.cmp(&b.price),
            Self::QuantityOnHand => a.quantity_on_hand.cmp(&b.quantity_on_hand),
            Self::CreatedDate => a.created_date.cmp(&b.created_date),
            Self::LastModifiedDate => a.last_modified_date.cmp(&b.last_modified_date),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Stamp a beer for insertion: fresh id, version 0, both timestamps `now`.
fn stamp_new(mut beer: Beer, now: NaiveDateTime) -> Beer {
    beer.id = Some(BeerId::new());
    beer.version = Some(0);
    beer.created_date = Some(now);
    beer.last_modified_date = Some(now);
    beer
}

/// Carry stored identity over `incoming`, bump the version and refresh the
/// modification time without ever moving it backwards.
fn stamp_replace(stored: &Beer, mut incoming: Beer, now: NaiveDateTime) -> Result<Beer> {
    let version = stored.version.unwrap_or(0);
    let next = version
        .checked_add(1)
        .ok_or_else(|| version_exhausted(stored.id, version))?;

    incoming.id = stored.id;
    incoming.created_date = stored.created_date;
    incoming.version = Some(next);
    incoming.last_modified_date = Some(match stored.last_modified_date {
        Some(previous) if previous > now => previous,
        _ => now,
    });
    Ok(incoming)
}

fn version_exhausted(id: Option<BeerId>, version: i32) -> Error {
    let id = id.map(|id| id.to_string()).unwrap_or_default();
    Error::CorruptRecord(format!("beer {} version {} cannot be incremented", id, version))
}

// ============================================================================
// IN-MEMORY
// ============================================================================

/// Process-local beer store
pub struct InMemoryBeerRepository {
    beers: RwLock<HashMap<BeerId, Beer>>,
    offset: FixedOffset,
}

impl InMemoryBeerRepository {
    /// Create an empty store whose clock reads local time at `offset`
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            beers: RwLock::new(HashMap::new()),
            offset,
        }
    }

    /// Number of stored beers
    pub fn len(&self) -> usize {
        self.beers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.beers.read().is_empty()
    }

    /// Store a record exactly as given, bypassing identity assignment.
    ///
    /// Used to seed fixtures, including records a client could never write.
    pub fn insert_raw(&self, beer: Beer) -> Result<()> {
        let id = beer
            .id
            .ok_or_else(|| Error::Configuration("raw insert requires an id".to_string()))?;
        self.beers.write().insert(id, beer);
        Ok(())
    }
}

impl Default for InMemoryBeerRepository {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

#[async_trait]
impl BeerRepositoryPort for InMemoryBeerRepository {
    async fn get_by_id(&self, id: BeerId) -> std::result::Result<Option<Beer>, ApplicationError> {
        Ok(self.beers.read().get(&id).cloned())
    }

    #[instrument(skip(self, beer), fields(beer_id = ?beer.id))]
    async fn save(&self, beer: Beer) -> std::result::Result<Beer, ApplicationError> {
        let now = now_local(&self.offset);
        let mut beers = self.beers.write();

        let saved = match beer.id {
            None => stamp_new(beer, now),
            Some(id) => {
                let stored = beers.get(&id).ok_or_else(|| ApplicationError::beer_not_found(id))?;
                stamp_replace(stored, beer, now)?
            }
        };

        if let Some(id) = saved.id {
            beers.insert(id, saved.clone());
        }
        debug!(version = ?saved.version, "Beer saved");
        Ok(saved)
    }

    async fn exists(&self, id: BeerId) -> std::result::Result<bool, ApplicationError> {
        Ok(self.beers.read().contains_key(&id))
    }
}

#[async_trait]
impl PagedRepository<Beer> for InMemoryBeerRepository {
    async fn find_page(
        &self,
        pagination: PaginationParams,
        sort: SortParams,
    ) -> Result<PaginatedResult<Beer>> {
        let field = BeerSortField::from_name(&sort.field);
        let mut beers: Vec<Beer> = self.beers.read().values().cloned().collect();
        beers.sort_by(|a, b| match sort.direction {
            SortDirection::Asc => field.compare(a, b),
            SortDirection::Desc => field.compare(b, a),
        });

        let total = beers.len() as u64;
        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);
        let items = beers.into_iter().skip(offset).take(limit).collect();

        Ok(PaginatedResult::from_params(items, &pagination, total))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.beers.read().len() as u64)
    }
}

// ============================================================================
// POSTGRES
// ============================================================================

/// PostgreSQL implementation of the beer store.
pub struct PgBeerRepository {
    pool: PgPool,
    offset: FixedOffset,
}

impl PgBeerRepository {
    /// Create a new PostgreSQL beer repository.
    pub fn new(pool: PgPool, offset: FixedOffset) -> Self {
        Self { pool, offset }
    }

    #[instrument(skip(self, beer))]
    async fn insert(&self, beer: Beer) -> Result<Beer> {
        let beer = stamp_new(beer, now_local(&self.offset));
        let id = beer
            .id
            .ok_or_else(|| Error::Configuration("new beer was not assigned an id".to_string()))?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO beer (
                id, version, created_date, last_modified_date, beer_name, beer_style,
                upc, price, quantity_on_hand, quantity_to_brew, min_on_hand
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            BEER_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(beer.version)
        .bind(beer.created_date)
        .bind(beer.last_modified_date)
        .bind(&beer.beer_name)
        .bind(&beer.beer_style)
        .bind(beer.upc)
        .bind(beer.price)
        .bind(beer.quantity_on_hand)
        .bind(beer.quantity_to_brew)
        .bind(beer.min_on_hand)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(beer_id = %id, "Beer inserted");
        row_to_beer(&row)
    }

    /// Replace in a single statement so existence check and write are atomic.
    #[instrument(skip(self, beer))]
    async fn replace(&self, id: BeerId, beer: Beer) -> Result<Beer> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE beer SET
                beer_name = $2,
                beer_style = $3,
                upc = $4,
                price = $5,
                quantity_on_hand = $6,
                quantity_to_brew = $7,
                min_on_hand = $8,
                version = version + 1,
                last_modified_date = GREATEST($9, last_modified_date)
            WHERE id = $1
            RETURNING {}
            "#,
            BEER_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(&beer.beer_name)
        .bind(&beer.beer_style)
        .bind(beer.upc)
        .bind(beer.price)
        .bind(beer.quantity_on_hand)
        .bind(beer.quantity_to_brew)
        .bind(beer.min_on_hand)
        .bind(now_local(&self.offset))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            let overflow = e
                .as_database_error()
                .and_then(|db| db.code())
                .is_some_and(|code| code == NUMERIC_VALUE_OUT_OF_RANGE);
            if overflow {
                Error::CorruptRecord(format!("beer {} version cannot be incremented", id))
            } else {
                Error::Database(e)
            }
        })?;

        match row {
            Some(row) => {
                debug!(beer_id = %id, "Beer replaced");
                row_to_beer(&row)
            }
            None => Err(Error::NotFound(format!("Beer {} not found", id))),
        }
    }
}

#[async_trait]
impl BeerRepositoryPort for PgBeerRepository {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: BeerId) -> std::result::Result<Option<Beer>, ApplicationError> {
        let row = sqlx::query(&format!("SELECT {} FROM beer WHERE id = $1", BEER_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.as_ref().map(row_to_beer).transpose()?)
    }

    async fn save(&self, beer: Beer) -> std::result::Result<Beer, ApplicationError> {
        let saved = match beer.id {
            None => self.insert(beer).await?,
            Some(id) => self.replace(id, beer).await?,
        };
        Ok(saved)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: BeerId) -> std::result::Result<bool, ApplicationError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM beer WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(exists)
    }
}

#[async_trait]
impl PagedRepository<Beer> for PgBeerRepository {
    #[instrument(skip(self))]
    async fn find_page(
        &self,
        pagination: PaginationParams,
        sort: SortParams,
    ) -> Result<PaginatedResult<Beer>> {
        let total = self.count().await?;

        // Column and direction come from closed sets, never from raw input
        let list_sql = format!(
            "SELECT {} FROM beer ORDER BY {} {}, id {} LIMIT $1 OFFSET $2",
            BEER_COLUMNS,
            BeerSortField::from_name(&sort.field).column(),
            sort.direction,
            sort.direction
        );

        let rows = sqlx::query(&list_sql)
            .bind(i64::try_from(pagination.limit()).unwrap_or(i64::MAX))
            .bind(i64::try_from(pagination.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let beers = rows.iter().map(row_to_beer).collect::<Result<Vec<_>>>()?;
        Ok(PaginatedResult::from_params(beers, &pagination, total))
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM beer")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

/// Convert a database row to a Beer.
///
/// A column that cannot be decoded is a corrupt record, not a store outage.
fn row_to_beer(row: &PgRow) -> Result<Beer> {
    let id: Uuid = column(row, "id")?;
    Ok(Beer {
        id: Some(BeerId::from_uuid(id)),
        version: Some(column(row, "version")?),
        created_date: Some(column(row, "created_date")?),
        last_modified_date: Some(column(row, "last_modified_date")?),
        beer_name: column(row, "beer_name")?,
        beer_style: column(row, "beer_style")?,
        upc: column(row, "upc")?,
        price: column(row, "price")?,
        quantity_on_hand: column(row, "quantity_on_hand")?,
        quantity_to_brew: column(row, "quantity_to_brew")?,
        min_on_hand: column(row, "min_on_hand")?,
    })
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| Error::CorruptRecord(format!("beer.{}: {}", name, e)))
}
