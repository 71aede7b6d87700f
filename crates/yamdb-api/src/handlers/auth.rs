//! Authentication handlers
//!
//! Signup and the exchange of a mailed confirmation code for a token.

use axum::{extract::State, Json};
use yamdb_service::dto::{SignupRequest, SignupResponse, TokenRequest, TokenResponse};
use yamdb_service::AuthService;

use crate::extractors::JsonBody;
use crate::response::ApiResult;
use crate::state::AppState;

/// Register (or re-register) and mail a confirmation code
///
/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> ApiResult<Json<SignupResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.signup(request).await?;
    Ok(Json(response))
}

/// Exchange a confirmation code for an access token
///
/// POST /auth/token
pub async fn token(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.obtain_token(request).await?;
    Ok(Json(response))
}
