//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of
//! one request and checks permissions before touching any repository.

pub mod auth;
pub mod category;
pub mod comment;
pub mod context;
pub mod error;
pub mod genre;
pub mod review;
pub mod title;
pub mod user;

// Re-export all services for convenience
pub use auth::AuthService;
pub use category::CategoryService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use genre::GenreService;
pub use review::ReviewService;
pub use title::TitleService;
pub use user::UserService;
