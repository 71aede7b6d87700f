//! Category handlers

use axum::{extract::State, Json};
use yamdb_service::dto::{CategoryResponse, CreateCategoryRequest, PaginatedResponse};
use yamdb_service::CategoryService;

use crate::extractors::{ApiPath, ApiQuery, JsonBody, OptionalAuthUser, Pagination, SearchParams};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    let page = service.list(params.term(), pagination.page_request()).await?;
    Ok(Json(pagination.envelope(page)))
}

/// POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    JsonBody(request): JsonBody<CreateCategoryRequest>,
) -> ApiResult<Created<Json<CategoryResponse>>> {
    let service = CategoryService::new(state.service_context());
    let response = service.create(auth.user(), request).await?;
    Ok(Created(Json(response)))
}

/// DELETE /categories/{slug}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(slug): ApiPath<String>,
) -> ApiResult<NoContent> {
    let service = CategoryService::new(state.service_context());
    service.delete(auth.user(), &slug).await?;
    Ok(NoContent)
}
