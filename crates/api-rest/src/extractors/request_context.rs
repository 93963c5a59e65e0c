//! Service context extractor.

use crate::middleware::RequestId;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use brewery_application::ServiceContext;
use std::convert::Infallible;

/// Service context correlated with the request id
#[derive(Debug, Clone)]
pub struct RequestContext(pub ServiceContext);

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = match parts.extensions.get::<RequestId>() {
            Some(id) => ServiceContext::new(id.as_str()),
            None => ServiceContext::internal(),
        };
        Ok(Self(ctx))
    }
}
