//! Domain entities - core business objects

mod category;
mod genre;
mod publication;
mod role;
mod title;
mod user;

pub use category::{Category, NewCategory};
pub use genre::{Genre, NewGenre};
pub use publication::{Author, Comment, NewComment, NewReview, Publication, Review};
pub use role::Role;
pub use title::{NewTitle, Title, TitleChanges, TitleDetails};
pub use user::{NewUser, User};

#[cfg(test)]
pub(crate) use user::sample_user;
