//! Beer DTO for the API layer

use brewery_domain::BeerStyle;
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Wire representation of a beer.
///
/// `id`, `version`, `createdDate` and `lastModifiedDate` are read-only: the
/// store owns them and any client-supplied value is ignored on writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeerDto {
    /// Id of Beer
    #[schema(read_only, value_type = Option<String>, format = Uuid)]
    pub id: Option<Uuid>,

    /// Version number
    #[schema(read_only)]
    pub version: Option<i32>,

    /// Date Created
    #[schema(read_only, value_type = Option<String>, format = DateTime)]
    pub created_date: Option<DateTime<FixedOffset>>,

    /// Date Updated
    #[schema(read_only, value_type = Option<String>, format = DateTime)]
    pub last_modified_date: Option<DateTime<FixedOffset>>,

    /// Beer Name
    #[validate(custom = "not_blank")]
    pub beer_name: String,

    /// Beer Style
    pub beer_style: BeerStyle,

    /// UPC of Beer
    #[validate(range(min = 1, message = "must be positive"))]
    pub upc: i64,

    /// Price
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(value_type = f64)]
    #[validate(custom = "positive_price")]
    pub price: Decimal,

    /// Quantity On Hand
    pub quantity_on_hand: Option<i32>,

    /// Quantity To Brew
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_to_brew: Option<i32>,

    /// Minimum On Hand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_on_hand: Option<i32>,
}

impl BeerDto {
    /// Create a write payload with only the required fields set
    pub fn new(beer_name: impl Into<String>, beer_style: BeerStyle, upc: i64, price: Decimal) -> Self {
        Self {
            id: None,
            version: None,
            created_date: None,
            last_modified_date: None,
            beer_name: beer_name.into(),
            beer_style,
            upc,
            price,
            quantity_on_hand: None,
            quantity_to_brew: None,
            min_on_hand: None,
        }
    }

    /// Set the quantity on hand
    pub fn with_quantity_on_hand(mut self, quantity: i32) -> Self {
        self.quantity_on_hand = Some(quantity);
        self
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

fn positive_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || value.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("must be positive".into());
        return Err(err);
    }
    Ok(())
}
