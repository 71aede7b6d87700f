//! User handlers
//!
//! Account administration (admin only) and the caller's own profile.

use axum::{extract::State, Json};
use yamdb_service::dto::{CreateUserRequest, PaginatedResponse, UpdateUserRequest, UserResponse};
use yamdb_service::UserService;

use crate::extractors::{ApiPath, ApiQuery, AuthUser, JsonBody, Pagination, SearchParams};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List accounts
///
/// GET /users?search=
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiQuery(params): ApiQuery<SearchParams>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let page = service
        .list(&caller, params.term(), pagination.page_request())
        .await?;
    Ok(Json(pagination.envelope(page)))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.create(&caller, request).await?;
    Ok(Created(Json(response)))
}

/// GET /users/{username}
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get(&caller, &username).await?;
    Ok(Json(response))
}

/// PATCH /users/{username}
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(username): ApiPath<String>,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update(&caller, &username, request).await?;
    Ok(Json(response))
}

/// DELETE /users/{username}
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.delete(&caller, &username).await?;
    Ok(NoContent)
}

/// Get current user
///
/// GET /users/me
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Json<UserResponse> {
    Json(UserService::new(state.service_context()).me(&caller))
}

/// Update current user; `role` only sticks for admins
///
/// PATCH /users/me
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_me(&caller, request).await?;
    Ok(Json(response))
}
