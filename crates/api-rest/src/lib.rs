//! Brewery REST API
//!
//! Axum adapter over the beer service boundary, plus the OpenAPI document and
//! the contract snippets generated from it.
//!
//! ## Architecture
//!
//! - **app**: router assembly and middleware stack
//! - **routes**: HTTP route handlers, versioned under `/api/v1`
//! - **middleware**: request id propagation and request logging
//! - **extractors**: path id, request context and validated JSON body
//! - **responses**: `201 Created` and `204 No Content` responses
//! - **error**: translation of service outcomes into status codes
//! - **docs**: OpenAPI document and contract snippet generation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use brewery_api_rest::{create_app, AppState};
//! use brewery_common::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let state = AppState::from_config(&config).await?;
//!     let app = create_app(state, &config);
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use app::create_app;
pub use docs::ApiDoc;
pub use error::{ApiError, ApiResult};
pub use state::{AppState, BeerServiceTrait};
