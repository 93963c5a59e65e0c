//! Custom Axum extractors.

pub mod beer_id;
pub mod request_context;
pub mod validated_json;

pub use beer_id::BeerIdPath;
pub use request_context::RequestContext;
pub use validated_json::ValidatedJson;
