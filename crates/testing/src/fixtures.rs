//! Test fixtures for beers and request bodies.

use brewery_application::BeerDto;
use brewery_domain::{Beer, BeerStyle};
use fake::{faker::lorem::en::Word, Fake};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::builders::{BeerBuilder, BeerDtoBuilder};

/// The canonical valid create payload
pub fn valid_beer_dto() -> BeerDto {
    BeerDtoBuilder::new().build()
}

/// The canonical valid create payload as raw JSON
pub fn nice_ale_json() -> Value {
    json!({
        "beerName": "Nice Ale",
        "beerStyle": "ALE",
        "price": 9.99,
        "upc": 123123123123_i64
    })
}

/// A random, valid beer name
pub fn random_beer_name() -> String {
    let word: String = Word().fake();
    format!("{} Ale", word)
}

/// Create an unsaved beer with a random name and style
pub fn create_test_beer() -> Beer {
    let styles = BeerStyle::all();
    let style = styles[(0..styles.len()).fake::<usize>()];
    BeerBuilder::new()
        .with_name(random_beer_name())
        .with_style(style)
        .with_upc((1..999_999_999_999_i64).fake())
        .with_price(Decimal::new((100..10_000_i64).fake(), 2))
        .with_quantity_on_hand((0..500).fake())
        .build()
}

/// Create several unsaved beers
pub fn create_test_beers(count: usize) -> Vec<Beer> {
    (0..count).map(|_| create_test_beer()).collect()
}
