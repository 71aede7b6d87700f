//! Pagination extractor
//!
//! Extracts limit/offset pagination parameters from query strings and builds
//! the `next`/`previous` links of the list envelope.

use axum::{
    async_trait,
    extract::{FromRequestParts, OriginalUri, Query},
    http::{request::Parts, Uri},
};
use serde::Deserialize;
use yamdb_core::traits::{Page, PageRequest};
use yamdb_service::dto::PaginatedResponse;

use crate::response::ApiError;

/// Default page size
const DEFAULT_LIMIT: i64 = 10;
/// Maximum page size
const MAX_LIMIT: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Validated pagination parameters plus the URI they came with
#[derive(Debug, Clone)]
pub struct Pagination {
    /// Page size, clamped to 1-100
    pub limit: i64,
    pub offset: i64,
    uri: Uri,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            uri: Uri::from_static("/"),
        }
    }
}

impl Pagination {
    fn from_params(params: PaginationParams, uri: Uri) -> Result<Self, ApiError> {
        let offset = params.offset.unwrap_or(0);
        if offset < 0 {
            return Err(ApiError::invalid_query("offset must not be negative"));
        }

        Ok(Self {
            limit: params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset,
            uri,
        })
    }

    /// Repository window for this request
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Wrap a page into the `{count, next, previous, results}` envelope
    pub fn envelope<T>(&self, page: Page<T>) -> PaginatedResponse<T> {
        let next = self
            .offset
            .checked_add(self.limit)
            .filter(|next| *next < page.total)
            .map(|next| self.link(Some(next)));

        let previous = (self.offset > 0).then(|| {
            let offset = self.offset - self.limit;
            self.link((offset > 0).then_some(offset))
        });

        PaginatedResponse::new(page.items, page.total, next, previous)
    }

    /// Same path and filters, other window
    fn link(&self, offset: Option<i64>) -> String {
        let mut pairs: Vec<String> = self
            .uri
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|pair| {
                let key = pair.split('=').next().unwrap_or_default();
                !pair.is_empty() && key != "limit" && key != "offset"
            })
            .map(str::to_string)
            .collect();

        pairs.push(format!("limit={}", self.limit));
        if let Some(offset) = offset {
            pairs.push(format!("offset={offset}"));
        }

        format!("{}?{}", self.uri.path(), pairs.join("&"))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        // nested routers strip their prefix from `parts.uri`
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.clone(), |original| original.0.clone());

        Pagination::from_params(params, uri)
    }
}
