//! Authentication extractor
//!
//! Resolves the bearer token in the Authorization header to the account it
//! was issued for.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use yamdb_core::User;
use yamdb_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated account loaded from the access token
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

async fn resolve(parts: &mut Parts, state: &AppState) -> Result<User, ApiError> {
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidAuthFormat)?;

    AuthService::new(state.service_context())
        .authenticate(bearer.token())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejected access token");
            ApiError::from(e)
        })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Err(ApiError::MissingAuth);
        }
        let app_state = AppState::from_ref(state);
        Ok(AuthUser(resolve(parts, &app_state).await?))
    }
}

/// Optional authenticated account
///
/// `None` when no Authorization header is present; a header that does not
/// resolve to an account is still rejected.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<User>);

impl OptionalAuthUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(OptionalAuthUser(None));
        }
        let app_state = AppState::from_ref(state);
        Ok(OptionalAuthUser(Some(resolve(parts, &app_state).await?)))
    }
}
