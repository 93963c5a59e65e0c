//! Fluent builder pattern for constructing test data.

use brewery_application::BeerDto;
use brewery_domain::{Beer, BeerId, BeerStyle};
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Builder for creating Beer entity test instances
#[derive(Clone)]
pub struct BeerBuilder {
    beer: Beer,
}

impl BeerBuilder {
    pub fn new() -> Self {
        Self {
            beer: Beer::new("Nice Ale", BeerStyle::Ale, 123123123123, Decimal::new(999, 2)),
        }
    }

    pub fn with_id(mut self, id: BeerId) -> Self {
        self.beer.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.beer.beer_name = name.into();
        self
    }

    pub fn with_style(mut self, style: BeerStyle) -> Self {
        self.beer.beer_style = style.as_str().to_string();
        self
    }

    /// Store arbitrary style text, including values outside `BeerStyle`
    pub fn with_raw_style(mut self, style: impl Into<String>) -> Self {
        self.beer.beer_style = style.into();
        self
    }

    pub fn with_upc(mut self, upc: i64) -> Self {
        self.beer.upc = upc;
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.beer.price = price;
        self
    }

    pub fn with_quantity_on_hand(mut self, quantity: i32) -> Self {
        self.beer.quantity_on_hand = Some(quantity);
        self
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.beer.version = Some(version);
        self
    }

    pub fn with_timestamps(mut self, created: NaiveDateTime, last_modified: NaiveDateTime) -> Self {
        self.beer.created_date = Some(created);
        self.beer.last_modified_date = Some(last_modified);
        self
    }

    /// Fill every store-owned field as if the beer had just been inserted
    pub fn persisted(mut self) -> Self {
        let now = Utc::now().naive_utc();
        self.beer.id = Some(self.beer.id.unwrap_or_default());
        self.beer.version = Some(self.beer.version.unwrap_or(0));
        self.beer.created_date = Some(self.beer.created_date.unwrap_or(now));
        self.beer.last_modified_date = Some(self.beer.last_modified_date.unwrap_or(now));
        self
    }

    pub fn build(self) -> Beer {
        self.beer
    }
}

impl Default for BeerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating BeerDto request bodies
#[derive(Clone)]
pub struct BeerDtoBuilder {
    dto: BeerDto,
}

impl BeerDtoBuilder {
    pub fn new() -> Self {
        Self {
            dto: BeerDto::new("Nice Ale", BeerStyle::Ale, 123123123123, Decimal::new(999, 2)),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.dto.beer_name = name.into();
        self
    }

    pub fn with_style(mut self, style: BeerStyle) -> Self {
        self.dto.beer_style = style;
        self
    }

    pub fn with_upc(mut self, upc: i64) -> Self {
        self.dto.upc = upc;
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.dto.price = price;
        self
    }

    pub fn with_quantity_on_hand(mut self, quantity: i32) -> Self {
        self.dto.quantity_on_hand = Some(quantity);
        self
    }

    pub fn with_quantity_to_brew(mut self, quantity: i32) -> Self {
        self.dto.quantity_to_brew = Some(quantity);
        self
    }

    pub fn with_min_on_hand(mut self, quantity: i32) -> Self {
        self.dto.min_on_hand = Some(quantity);
        self
    }

    /// Populate the read-only fields with values a store would never assign
    pub fn with_forged_identity(mut self) -> Self {
        self.dto.id = Some(Uuid::nil());
        self.dto.version = Some(9_999);
        let epoch = chrono::DateTime::UNIX_EPOCH.fixed_offset();
        self.dto.created_date = Some(epoch);
        self.dto.last_modified_date = Some(epoch);
        self
    }

    pub fn build(self) -> BeerDto {
        self.dto
    }
}

impl Default for BeerDtoBuilder {
    fn default() -> Self {
        Self::new()
    }
}
