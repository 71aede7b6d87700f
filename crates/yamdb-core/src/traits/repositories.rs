//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer states what it needs; `yamdb-db` provides the
//! PostgreSQL implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Category, Comment, Genre, NewCategory, NewComment, NewGenre, NewReview, NewTitle, NewUser,
    Review, TitleChanges, TitleDetails, User,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Limit/offset window for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
        }
    }
}

/// One window of a list query plus the total number of matching rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Every account holding this username or this email (at most two)
    async fn find_by_username_or_email(&self, username: &str, email: &str)
        -> RepoResult<Vec<User>>;

    /// List users, optionally filtered by a username substring
    async fn list(&self, search: Option<&str>, page: PageRequest) -> RepoResult<Page<User>>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Persist every editable column of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Delete a user by username
    async fn delete(&self, username: &str) -> RepoResult<()>;

    /// Record a successful token exchange
    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// Category / Genre Repositories
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List categories, optionally filtered by a name substring
    async fn list(&self, search: Option<&str>, page: PageRequest) -> RepoResult<Page<Category>>;

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>>;

    async fn create(&self, category: &NewCategory) -> RepoResult<Category>;

    async fn delete(&self, slug: &str) -> RepoResult<()>;
}

#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// List genres, optionally filtered by a name substring
    async fn list(&self, search: Option<&str>, page: PageRequest) -> RepoResult<Page<Genre>>;

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Genre>>;

    /// Resolve several slugs at once; unknown slugs are simply absent
    async fn find_by_slugs(&self, slugs: &[String]) -> RepoResult<Vec<Genre>>;

    async fn create(&self, genre: &NewGenre) -> RepoResult<Genre>;

    async fn delete(&self, slug: &str) -> RepoResult<()>;
}

// ============================================================================
// Title Repository
// ============================================================================

/// Filters accepted by the title list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFilter {
    /// Category slug, exact
    pub category: Option<String>,
    /// Genre slug, exact
    pub genre: Option<String>,
    /// Name substring, case-insensitive
    pub name: Option<String>,
    pub year: Option<i32>,
}

#[async_trait]
pub trait TitleRepository: Send + Sync {
    /// List titles with category, genres and rating
    async fn list(&self, filter: &TitleFilter, page: PageRequest)
        -> RepoResult<Page<TitleDetails>>;

    /// Find one title with category, genres and rating
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<TitleDetails>>;

    async fn exists(&self, id: i64) -> RepoResult<bool>;

    /// Insert the title and its genre links atomically, returning the new ID
    async fn create(&self, title: &NewTitle) -> RepoResult<i64>;

    /// Apply a partial update; genre links are replaced when present
    async fn update(&self, id: i64, changes: &TitleChanges) -> RepoResult<()>;

    /// Delete a title together with its reviews and their comments
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

// ============================================================================
// Review Repository
// ============================================================================

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reviews of a title, newest first
    async fn list_by_title(&self, title_id: i64, page: PageRequest) -> RepoResult<Page<Review>>;

    /// Find a review only if it belongs to the given title
    async fn find_in_title(&self, title_id: i64, review_id: i64) -> RepoResult<Option<Review>>;

    /// Check whether the author already reviewed the title
    async fn exists_for_author(&self, title_id: i64, author_id: i64) -> RepoResult<bool>;

    async fn create(&self, review: &NewReview) -> RepoResult<Review>;

    async fn update(&self, id: i64, text: &str, score: i16) -> RepoResult<()>;

    async fn delete(&self, id: i64) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments of a review, newest first
    async fn list_by_review(&self, review_id: i64, page: PageRequest)
        -> RepoResult<Page<Comment>>;

    /// Find a comment only if it belongs to the given review
    async fn find_in_review(&self, review_id: i64, comment_id: i64)
        -> RepoResult<Option<Comment>>;

    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;

    async fn update(&self, id: i64, text: &str) -> RepoResult<()>;

    async fn delete(&self, id: i64) -> RepoResult<()>;
}
