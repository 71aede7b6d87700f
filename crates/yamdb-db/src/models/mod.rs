//! Database models - SQLx-compatible structs for PostgreSQL rows

mod catalog;
mod publication;
mod title;
mod user;

pub use catalog::{CategoryModel, GenreModel};
pub use publication::{CommentModel, ReviewModel};
pub use title::{TitleGenreModel, TitleModel};
pub use user::UserModel;
