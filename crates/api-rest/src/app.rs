//! Application builder and configuration.
//!
//! This module assembles all routes, middleware, and state into an Axum
//! router.

use crate::{
    docs::{openapi_json, ApiDoc},
    error::{ApiError, ApiResult},
    middleware::{logging_middleware, request_id_middleware},
    routes,
    state::AppState,
};
use axum::{middleware, routing::get, Json, Router};
use brewery_common::AppConfig;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Path the OpenAPI document is served at
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Path of the Swagger UI
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Create the main application router
pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    let mut app = Router::new()
        // Health check routes
        .merge(routes::health::routes())
        // API v1 routes
        .nest(routes::v1::BASE_PATH, routes::v1::routes())
        .with_state(state);

    // Swagger UI serves the document itself; otherwise expose it directly
    app = if config.server.enable_swagger {
        app.merge(swagger_ui())
    } else {
        app.route(OPENAPI_PATH, get(openapi_document))
    };

    app.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(request_id_middleware))
            .layer(middleware::from_fn(logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(build_cors_layer())
            .layer(TimeoutLayer::new(config.request_timeout())),
    )
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi())
}

async fn openapi_document() -> ApiResult<Json<Value>> {
    openapi_json()
        .map(Json)
        .map_err(|e| ApiError::Internal(e.to_string()))
}
