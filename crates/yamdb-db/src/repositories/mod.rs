//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in yamdb-core.
//! Each repository handles database operations for a specific domain entity.

mod category;
mod comment;
mod error;
mod genre;
mod review;
mod title;
mod user;

pub use category::PgCategoryRepository;
pub use comment::PgCommentRepository;
pub use error::map_db_error;
pub use genre::PgGenreRepository;
pub use review::PgReviewRepository;
pub use title::PgTitleRepository;
pub use user::PgUserRepository;
