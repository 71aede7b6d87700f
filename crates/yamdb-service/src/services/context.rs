//! Service context - dependency container for services
//!
//! Holds all repositories and the auth/mail collaborators needed by services.

use std::sync::Arc;

use yamdb_common::auth::{ConfirmationCodes, JwtService};
use yamdb_common::Mailer;
use yamdb_core::traits::{
    CategoryRepository, CommentRepository, GenreRepository, ReviewRepository, TitleRepository,
    UserRepository,
};
use yamdb_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - JWT service for access tokens
/// - Confirmation code generator
/// - Outgoing mail transport
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent when repositories are not database backed
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    genre_repo: Arc<dyn GenreRepository>,
    title_repo: Arc<dyn TitleRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    comment_repo: Arc<dyn CommentRepository>,

    // Auth and mail
    jwt_service: Arc<JwtService>,
    confirmation_codes: Arc<ConfirmationCodes>,
    mailer: Arc<dyn Mailer>,
}

impl ServiceContext {
    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    pub fn genre_repo(&self) -> &dyn GenreRepository {
        self.genre_repo.as_ref()
    }

    pub fn title_repo(&self) -> &dyn TitleRepository {
        self.title_repo.as_ref()
    }

    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    // === Auth and mail ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the confirmation code generator
    pub fn confirmation_codes(&self) -> &ConfirmationCodes {
        self.confirmation_codes.as_ref()
    }

    /// Get the mail transport
    pub fn mailer(&self) -> &dyn Mailer {
        self.mailer.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("confirmation_codes", &self.confirmation_codes)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    genre_repo: Option<Arc<dyn GenreRepository>>,
    title_repo: Option<Arc<dyn TitleRepository>>,
    review_repo: Option<Arc<dyn ReviewRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    confirmation_codes: Option<Arc<ConfirmationCodes>>,
    mailer: Option<Arc<dyn Mailer>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn genre_repo(mut self, repo: Arc<dyn GenreRepository>) -> Self {
        self.genre_repo = Some(repo);
        self
    }

    pub fn title_repo(mut self, repo: Arc<dyn TitleRepository>) -> Self {
        self.title_repo = Some(repo);
        self
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn confirmation_codes(mut self, codes: Arc<ConfirmationCodes>) -> Self {
        self.confirmation_codes = Some(codes);
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            pool: self.pool,
            user_repo: required(self.user_repo, "user_repo")?,
            category_repo: required(self.category_repo, "category_repo")?,
            genre_repo: required(self.genre_repo, "genre_repo")?,
            title_repo: required(self.title_repo, "title_repo")?,
            review_repo: required(self.review_repo, "review_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            confirmation_codes: required(self.confirmation_codes, "confirmation_codes")?,
            mailer: required(self.mailer, "mailer")?,
        })
    }
}
