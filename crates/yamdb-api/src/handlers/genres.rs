//! Genre handlers

use axum::{extract::State, Json};
use yamdb_service::dto::{CreateGenreRequest, GenreResponse, PaginatedResponse};
use yamdb_service::GenreService;

use crate::extractors::{ApiPath, ApiQuery, JsonBody, OptionalAuthUser, Pagination, SearchParams};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /genres
pub async fn list_genres(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<GenreResponse>>> {
    let service = GenreService::new(state.service_context());
    let page = service.list(params.term(), pagination.page_request()).await?;
    Ok(Json(pagination.envelope(page)))
}

/// POST /genres
pub async fn create_genre(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    JsonBody(request): JsonBody<CreateGenreRequest>,
) -> ApiResult<Created<Json<GenreResponse>>> {
    let service = GenreService::new(state.service_context());
    let response = service.create(auth.user(), request).await?;
    Ok(Created(Json(response)))
}

/// DELETE /genres/{slug}
pub async fn delete_genre(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(slug): ApiPath<String>,
) -> ApiResult<NoContent> {
    let service = GenreService::new(state.service_context());
    service.delete(auth.user(), &slug).await?;
    Ok(NoContent)
}
