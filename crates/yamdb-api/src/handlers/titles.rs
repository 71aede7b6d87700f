//! Title handlers
//!
//! Reads answer with nested category and genres plus the rating; writes
//! take and answer with slugs.

use axum::{extract::State, Json};
use yamdb_core::traits::TitleFilter;
use yamdb_service::dto::{PaginatedResponse, TitleResponse, TitleWriteRequest};
use yamdb_service::TitleService;

use crate::extractors::{ApiPath, ApiQuery, JsonBody, OptionalAuthUser, Pagination, TitleQuery};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List titles
///
/// GET /titles?category=&genre=&name=&year=
pub async fn list_titles(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TitleQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<TitleResponse>>> {
    let filter = TitleFilter::from(query);
    let service = TitleService::new(state.service_context());
    let page = service.list(&filter, pagination.page_request()).await?;
    Ok(Json(pagination.envelope(page)))
}

/// GET /titles/{title_id}
pub async fn get_title(
    State(state): State<AppState>,
    ApiPath(title_id): ApiPath<i64>,
) -> ApiResult<Json<TitleResponse>> {
    let service = TitleService::new(state.service_context());
    let response = service.get(title_id).await?;
    Ok(Json(response))
}

/// POST /titles
pub async fn create_title(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    JsonBody(request): JsonBody<TitleWriteRequest>,
) -> ApiResult<Created<Json<TitleResponse>>> {
    let service = TitleService::new(state.service_context());
    let response = service.create(auth.user(), request).await?;
    Ok(Created(Json(response)))
}

/// Replace a title
///
/// PUT /titles/{title_id}
pub async fn update_title(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(title_id): ApiPath<i64>,
    JsonBody(request): JsonBody<TitleWriteRequest>,
) -> ApiResult<Json<TitleResponse>> {
    let service = TitleService::new(state.service_context());
    let response = service.update(auth.user(), title_id, request).await?;
    Ok(Json(response))
}

/// Partially update a title
///
/// PATCH /titles/{title_id}
pub async fn patch_title(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(title_id): ApiPath<i64>,
    JsonBody(request): JsonBody<TitleWriteRequest>,
) -> ApiResult<Json<TitleResponse>> {
    let service = TitleService::new(state.service_context());
    let response = service.partial_update(auth.user(), title_id, request).await?;
    Ok(Json(response))
}

/// Delete a title with its reviews and comments
///
/// DELETE /titles/{title_id}
pub async fn delete_title(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(title_id): ApiPath<i64>,
) -> ApiResult<NoContent> {
    let service = TitleService::new(state.service_context());
    service.delete(auth.user(), title_id).await?;
    Ok(NoContent)
}
