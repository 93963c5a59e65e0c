//! Beer entity <-> DTO mapping.
//!
//! Every field maps by name. The two exceptions are the audit timestamps,
//! which gain or lose the configured zone offset, and the style, which is
//! free text in storage and a closed enumeration on the wire.

use crate::dto::BeerDto;
use crate::{ApplicationError, ApplicationResult};
use brewery_common::datetime::{attach_offset, to_local_naive};
use brewery_domain::{Beer, BeerId};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};

/// Stateless entity/DTO transform bound to one zone offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeerMapper {
    offset: FixedOffset,
}

impl Default for BeerMapper {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl BeerMapper {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Offset that naive storage timestamps are interpreted in
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Map a persisted beer to its wire form.
    ///
    /// Fails with `UnmappableEnum` when the stored style is outside the
    /// closed enumeration.
    pub fn to_dto(&self, beer: &Beer) -> ApplicationResult<BeerDto> {
        let beer_style = beer.style()?;

        Ok(BeerDto {
            id: beer.id.map(BeerId::into_uuid),
            version: beer.version,
            created_date: self.wire_timestamp(beer.created_date)?,
            last_modified_date: self.wire_timestamp(beer.last_modified_date)?,
            beer_name: beer.beer_name.clone(),
            beer_style,
            upc: beer.upc,
            price: beer.price,
            quantity_on_hand: beer.quantity_on_hand,
            quantity_to_brew: beer.quantity_to_brew,
            min_on_hand: beer.min_on_hand,
        })
    }

    /// Map a wire beer to an entity, field for field.
    ///
    /// Store-owned fields are copied as well; callers that must ignore them
    /// strip them with [`Beer::without_identity`] or use [`Self::apply_update`].
    pub fn to_entity(&self, dto: &BeerDto) -> Beer {
        Beer {
            id: dto.id.map(BeerId::from_uuid),
            version: dto.version,
            created_date: dto.created_date.as_ref().map(|dt| self.storage_timestamp(dt)),
            last_modified_date: dto
                .last_modified_date
                .as_ref()
                .map(|dt| self.storage_timestamp(dt)),
            beer_name: dto.beer_name.clone(),
            beer_style: dto.beer_style.as_str().to_string(),
            upc: dto.upc,
            price: dto.price,
            quantity_on_hand: dto.quantity_on_hand,
            quantity_to_brew: dto.quantity_to_brew,
            min_on_hand: dto.min_on_hand,
        }
    }

    /// Copy the client-mutable fields of `dto` onto `existing`.
    ///
    /// Identity, version and timestamps stay as stored. `quantityToBrew` and
    /// `minOnHand` are only replaced when supplied.
    pub fn apply_update(&self, mut existing: Beer, dto: &BeerDto) -> Beer {
        existing.beer_name = dto.beer_name.clone();
        existing.beer_style = dto.beer_style.as_str().to_string();
        existing.upc = dto.upc;
        existing.price = dto.price;
        existing.quantity_on_hand = dto.quantity_on_hand;
        if dto.quantity_to_brew.is_some() {
            existing.quantity_to_brew = dto.quantity_to_brew;
        }
        if dto.min_on_hand.is_some() {
            existing.min_on_hand = dto.min_on_hand;
        }
        existing
    }

    fn wire_timestamp(
        &self,
        naive: Option<NaiveDateTime>,
    ) -> ApplicationResult<Option<DateTime<FixedOffset>>> {
        naive
            .map(|value| {
                attach_offset(value, &self.offset).ok_or_else(|| {
                    ApplicationError::Internal(format!(
                        "Timestamp {} is not representable at offset {}",
                        value, self.offset
                    ))
                })
            })
            .transpose()
    }

    fn storage_timestamp(&self, datetime: &DateTime<FixedOffset>) -> NaiveDateTime {
        to_local_naive(datetime, &self.offset)
    }
}
