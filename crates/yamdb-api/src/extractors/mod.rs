//! Axum extractors for request handling
//!
//! Custom extractors for authentication, pagination, and request decoding.

mod auth;
mod json;
mod pagination;
mod path;
mod query;

pub use auth::{AuthUser, OptionalAuthUser};
pub use json::JsonBody;
pub use pagination::{Pagination, PaginationParams};
pub use path::{ApiPath, CommentPath, ReviewPath, TitlePath};
pub use query::{ApiQuery, SearchParams, TitleQuery};
