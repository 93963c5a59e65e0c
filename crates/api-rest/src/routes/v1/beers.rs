//! Beer endpoints.

use super::BASE_PATH;
use crate::{
    error::{ApiError, ApiResult},
    extractors::{BeerIdPath, RequestContext, ValidatedJson},
    responses::{Created, NoContent},
    state::AppState,
};
use axum::{
    extract::{RawQuery, State},
    routing::{get, post},
    Json, Router,
};
use brewery_application::BeerDto;
use tracing::debug;
use utoipa::IntoParams;

/// Query parameters documented on the get route
///
/// The raw query string is never decoded, so repeated or unknown parameters
/// are accepted and none of them change the result.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BeerQuery {
    /// Is Beer Cold Query param
    pub iscold: Option<String>,
}

/// Beer routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/beer/", post(save_new_beer))
        .route("/beer", post(save_new_beer))
        .route("/beer/:beerId", get(get_beer_by_id).put(update_beer_by_id))
}

/// Get beer by id
#[utoipa::path(
    get,
    path = "/api/v1/beer/{beerId}",
    operation_id = "get-beer",
    tag = "beer",
    params(
        ("beerId" = Uuid, Path, description = "UUID of desired beer to get."),
        BeerQuery,
    ),
    responses(
        (status = 200, description = "Beer found", body = BeerDto),
        (status = 400, description = "Malformed beer id or unmappable stored beer", body = crate::error::ErrorResponse),
        (status = 404, description = "Beer not found", body = crate::error::ErrorResponse),
        (status = 503, description = "Beer store unavailable", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_beer_by_id(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    BeerIdPath(id): BeerIdPath,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<BeerDto>> {
    debug!(query = ?query, "Ignoring query parameters");

    let beer = state.beer_service.get_by_id(&ctx, id).await?;

    Ok(Json(beer))
}

/// Create a new beer
///
/// `id`, `version`, `createdDate` and `lastModifiedDate` in the body are ignored.
#[utoipa::path(
    post,
    path = "/api/v1/beer/",
    operation_id = "new-beer",
    tag = "beer",
    request_body = BeerDto,
    responses(
        (status = 201, description = "Beer created",
            headers(("Location" = String, description = "Path of the new beer"))),
        (status = 400, description = "Malformed or invalid beer", body = crate::error::ErrorResponse),
        (status = 503, description = "Beer store unavailable", body = crate::error::ErrorResponse),
    )
)]
pub async fn save_new_beer(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    ValidatedJson(dto): ValidatedJson<BeerDto>,
) -> ApiResult<Created> {
    let created = state.beer_service.create(&ctx, dto).await?;

    let id = created
        .id
        .ok_or_else(|| ApiError::Internal("created beer has no id".to_string()))?;

    Ok(Created::at(format!("{}/beer/{}", BASE_PATH, id)))
}

/// Update an existing beer
///
/// Never creates a beer; an unknown id answers 404.
#[utoipa::path(
    put,
    path = "/api/v1/beer/{beerId}",
    operation_id = "update-beer",
    tag = "beer",
    params(
        ("beerId" = Uuid, Path, description = "UUID of beer to update."),
    ),
    request_body = BeerDto,
    responses(
        (status = 204, description = "Beer updated"),
        (status = 400, description = "Malformed beer id or invalid beer", body = crate::error::ErrorResponse),
        (status = 404, description = "Beer not found", body = crate::error::ErrorResponse),
        (status = 503, description = "Beer store unavailable", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_beer_by_id(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
    BeerIdPath(id): BeerIdPath,
    ValidatedJson(dto): ValidatedJson<BeerDto>,
) -> ApiResult<NoContent> {
    state.beer_service.update(&ctx, id, dto).await?;

    Ok(NoContent)
}
