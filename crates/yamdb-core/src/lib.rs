//! # yamdb-core
//!
//! Domain layer containing entities, access predicates, field rules and
//! repository traits. Nothing here knows about the database or HTTP.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Author, Category, Comment, Genre, NewCategory, NewComment, NewGenre, NewReview, NewTitle,
    NewUser, Publication, Review, Role, Title, TitleChanges, TitleDetails, User,
};
pub use error::DomainError;
pub use traits::{
    CategoryRepository, CommentRepository, GenreRepository, Page, PageRequest, RepoResult,
    ReviewRepository, TitleFilter, TitleRepository, UserRepository,
};
pub use value_objects::{permissions, validation, Access, Actor, Verdict};
