//! Beer entity and style types.
//!
//! `Beer` is the persisted record. Its identity, version and audit
//! timestamps stay `None` until the store persists it; afterwards the store
//! owns them. The style is kept as free text on the storage side and only
//! becomes a closed [`BeerStyle`] when crossing to the wire.

use crate::errors::DomainError;
use crate::identifiers::BeerId;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use utoipa::ToSchema;

/// Closed set of beer styles accepted on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerStyle {
    /// Ale
    Ale,
    /// Pale ale
    PaleAle,
    /// India pale ale
    Ipa,
    /// Wheat beer
    Wheat,
    /// Porter
    Porter,
    /// Stout
    Stout,
    /// Gose
    Gose,
    /// Lager
    Lager,
    /// Saison
    Saison,
}

impl BeerStyle {
    /// All styles, in declaration order
    pub fn all() -> &'static [BeerStyle] {
        &[
            Self::Ale,
            Self::PaleAle,
            Self::Ipa,
            Self::Wheat,
            Self::Porter,
            Self::Stout,
            Self::Gose,
            Self::Lager,
            Self::Saison,
        ]
    }

    /// Canonical name, identical on the wire and in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ale => "ALE",
            Self::PaleAle => "PALE_ALE",
            Self::Ipa => "IPA",
            Self::Wheat => "WHEAT",
            Self::Porter => "PORTER",
            Self::Stout => "STOUT",
            Self::Gose => "GOSE",
            Self::Lager => "LAGER",
            Self::Saison => "SAISON",
        }
    }
}

impl Display for BeerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeerStyle {
    type Err = DomainError;

    /// Exact match on the canonical name; anything else is unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| DomainError::UnknownBeerStyle(s.to_string()))
    }
}

/// Persisted beer record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beer {
    /// Assigned by the store on insert, immutable afterwards
    pub id: Option<BeerId>,
    /// Mutation counter maintained by the store
    pub version: Option<i32>,
    /// Zone-naive creation timestamp, set once by the store
    pub created_date: Option<NaiveDateTime>,
    /// Zone-naive timestamp of the last persisted mutation
    pub last_modified_date: Option<NaiveDateTime>,
    /// Display name
    pub beer_name: String,
    /// Storage-side style text
    pub beer_style: String,
    /// Universal product code
    pub upc: i64,
    /// Exact currency amount
    pub price: Decimal,
    /// Units in stock
    pub quantity_on_hand: Option<i32>,
    /// Units scheduled for brewing
    pub quantity_to_brew: Option<i32>,
    /// Reorder threshold
    pub min_on_hand: Option<i32>,
}

impl Beer {
    /// Create an unsaved beer with no stock information
    pub fn new(beer_name: impl Into<String>, beer_style: BeerStyle, upc: i64, price: Decimal) -> Self {
        Self {
            id: None,
            version: None,
            created_date: None,
            last_modified_date: None,
            beer_name: beer_name.into(),
            beer_style: beer_style.as_str().to_string(),
            upc,
            price,
            quantity_on_hand: None,
            quantity_to_brew: None,
            min_on_hand: None,
        }
    }

    /// True until the store has assigned an identity
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Drop every store-owned field so the record persists as a new one.
    pub fn without_identity(mut self) -> Self {
        self.id = None;
        self.version = None;
        self.created_date = None;
        self.last_modified_date = None;
        self
    }

    /// Parse the stored style text into the closed enumeration
    pub fn style(&self) -> Result<BeerStyle, DomainError> {
        self.beer_style.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_names_round_trip() {
        for style in BeerStyle::all() {
            assert_eq!(style.as_str().parse::<BeerStyle>().unwrap(), *style);
        }
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        assert_eq!(
            "pale_ale".parse::<BeerStyle>(),
            Err(DomainError::UnknownBeerStyle("pale_ale".to_string()))
        );
        assert!("PILSNER".parse::<BeerStyle>().is_err());
        assert!("".parse::<BeerStyle>().is_err());
    }

    #[test]
    fn test_style_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&BeerStyle::PaleAle).unwrap();
        assert_eq!(json, "\"PALE_ALE\"");

        let style: BeerStyle = serde_json::from_str("\"SAISON\"").unwrap();
        assert_eq!(style, BeerStyle::Saison);

        assert!(serde_json::from_str::<BeerStyle>("\"CIDER\"").is_err());
    }

    #[test]
    fn test_new_beer_has_no_identity() {
        let beer = Beer::new("Nice Ale", BeerStyle::Ale, 123123123123, Decimal::new(999, 2));
        assert!(beer.is_new());
        assert_eq!(beer.version, None);
        assert_eq!(beer.beer_style, "ALE");
        assert_eq!(beer.style().unwrap(), BeerStyle::Ale);
    }

    #[test]
    fn test_without_identity_clears_store_fields() {
        let mut beer = Beer::new("Nice Ale", BeerStyle::Ale, 1, Decimal::new(100, 2));
        beer.id = Some(BeerId::new());
        beer.version = Some(3);
        beer.created_date = Some(chrono::Utc::now().naive_utc());
        beer.last_modified_date = beer.created_date;

        let cleared = beer.clone().without_identity();
        assert!(cleared.is_new());
        assert_eq!(cleared.version, None);
        assert_eq!(cleared.created_date, None);
        assert_eq!(cleared.last_modified_date, None);
        assert_eq!(cleared.beer_name, beer.beer_name);
        assert_eq!(cleared.price, beer.price);
    }
}
