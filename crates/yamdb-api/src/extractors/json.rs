//! JSON body extractor
//!
//! Deserializes only. Field validation belongs to the services, which run it
//! after their permission checks.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// JSON body with API error rejection
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| match e {
                JsonRejection::JsonDataError(e) => ApiError::InvalidBody(e.body_text()),
                JsonRejection::JsonSyntaxError(e) => ApiError::InvalidBody(e.body_text()),
                JsonRejection::MissingJsonContentType(e) => ApiError::InvalidBody(e.body_text()),
                JsonRejection::BytesRejection(e) => ApiError::InvalidBody(e.body_text()),
                _ => ApiError::InvalidBody("Invalid JSON body".to_string()),
            })?;

        Ok(JsonBody(value))
    }
}
