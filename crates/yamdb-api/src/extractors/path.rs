//! Path parameter extractors
//!
//! Rejections are reported as `INVALID_PATH_PARAMETER` instead of axum's
//! plain-text body.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::response::ApiError;

/// Path extractor with API error rejection
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(ApiPath(inner))
    }
}

/// `/titles/:title_id/reviews`
#[derive(Debug, Deserialize)]
pub struct TitlePath {
    pub title_id: i64,
}

/// `/titles/:title_id/reviews/:review_id[/comments]`
#[derive(Debug, Deserialize)]
pub struct ReviewPath {
    pub title_id: i64,
    pub review_id: i64,
}

/// `/titles/:title_id/reviews/:review_id/comments/:comment_id`
#[derive(Debug, Deserialize)]
pub struct CommentPath {
    pub title_id: i64,
    pub review_id: i64,
    pub comment_id: i64,
}
