//! Beer id path extractor.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use brewery_domain::BeerId;
use uuid::Uuid;

/// The `{beerId}` path segment, parsed as a UUID.
///
/// A malformed id is rejected with 400 rather than reaching the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeerIdPath(pub BeerId);

#[async_trait]
impl<S> FromRequestParts<S> for BeerIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state).await?;
        Ok(Self(BeerId::from_uuid(id)))
    }
}
