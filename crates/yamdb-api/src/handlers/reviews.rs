//! Review handlers

use axum::{extract::State, Json};
use yamdb_service::dto::{PaginatedResponse, ReviewRequest, ReviewResponse};
use yamdb_service::ReviewService;

use crate::extractors::{ApiPath, JsonBody, OptionalAuthUser, Pagination, ReviewPath, TitlePath};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Reviews of a title, newest first
///
/// GET /titles/{title_id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<TitlePath>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let page = service.list(path.title_id, pagination.page_request()).await?;
    Ok(Json(pagination.envelope(page)))
}

/// GET /titles/{title_id}/reviews/{review_id}
pub async fn get_review(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<ReviewPath>,
) -> ApiResult<Json<ReviewResponse>> {
    let service = ReviewService::new(state.service_context());
    let response = service.get(path.title_id, path.review_id).await?;
    Ok(Json(response))
}

/// Review a title as the caller
///
/// POST /titles/{title_id}/reviews
pub async fn create_review(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(path): ApiPath<TitlePath>,
    JsonBody(request): JsonBody<ReviewRequest>,
) -> ApiResult<Created<Json<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let response = service.create(auth.user(), path.title_id, request).await?;
    Ok(Created(Json(response)))
}

/// PUT /titles/{title_id}/reviews/{review_id}
pub async fn update_review(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(path): ApiPath<ReviewPath>,
    JsonBody(request): JsonBody<ReviewRequest>,
) -> ApiResult<Json<ReviewResponse>> {
    let service = ReviewService::new(state.service_context());
    let response = service
        .update(auth.user(), path.title_id, path.review_id, request)
        .await?;
    Ok(Json(response))
}

/// PATCH /titles/{title_id}/reviews/{review_id}
pub async fn patch_review(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(path): ApiPath<ReviewPath>,
    JsonBody(request): JsonBody<ReviewRequest>,
) -> ApiResult<Json<ReviewResponse>> {
    let service = ReviewService::new(state.service_context());
    let response = service
        .partial_update(auth.user(), path.title_id, path.review_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /titles/{title_id}/reviews/{review_id}
pub async fn delete_review(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(path): ApiPath<ReviewPath>,
) -> ApiResult<NoContent> {
    let service = ReviewService::new(state.service_context());
    service
        .delete(auth.user(), path.title_id, path.review_id)
        .await?;
    Ok(NoContent)
}
