//! API v1 routes.

use crate::state::AppState;
use axum::Router;

pub mod beers;

/// Base path all v1 routes are nested under
pub const BASE_PATH: &str = "/api/v1";

/// Create all v1 API routes
pub fn routes() -> Router<AppState> {
    Router::new().merge(beers::routes())
}
