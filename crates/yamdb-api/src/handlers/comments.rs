//! Comment handlers
//!
//! Comments are addressed through their review and its title; both must
//! match the path.

use axum::{extract::State, Json};
use yamdb_service::dto::{CommentRequest, CommentResponse, PaginatedResponse};
use yamdb_service::CommentService;

use crate::extractors::{ApiPath, CommentPath, JsonBody, OptionalAuthUser, Pagination, ReviewPath};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /titles/{title_id}/reviews/{review_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<ReviewPath>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let page = service
        .list(path.title_id, path.review_id, pagination.page_request())
        .await?;
    Ok(Json(pagination.envelope(page)))
}

/// GET /titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn get_comment(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<CommentPath>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .get(path.title_id, path.review_id, path.comment_id)
        .await?;
    Ok(Json(response))
}

/// POST /titles/{title_id}/reviews/{review_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(path): ApiPath<ReviewPath>,
    JsonBody(request): JsonBody<CommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .create(auth.user(), path.title_id, path.review_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// PUT /titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(path): ApiPath<CommentPath>,
    JsonBody(request): JsonBody<CommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .update(auth.user(), path.title_id, path.review_id, path.comment_id, request)
        .await?;
    Ok(Json(response))
}

/// PATCH /titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn patch_comment(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(path): ApiPath<CommentPath>,
    JsonBody(request): JsonBody<CommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .partial_update(auth.user(), path.title_id, path.review_id, path.comment_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ApiPath(path): ApiPath<CommentPath>,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service
        .delete(auth.user(), path.title_id, path.review_id, path.comment_id)
        .await?;
    Ok(NoContent)
}
