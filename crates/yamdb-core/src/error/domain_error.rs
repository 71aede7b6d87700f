//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Genre not found: {0}")]
    GenreNotFound(String),

    #[error("Title not found: {0}")]
    TitleNotFound(i64),

    #[error("Review not found: {0}")]
    ReviewNotFound(i64),

    #[error("Comment not found: {0}")]
    CommentNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{field}: {message}")]
    FieldError { field: &'static str, message: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    #[error("Year {year} exceeds allowed ({max})")]
    YearInFuture { year: i32, max: i32 },

    #[error("Score cannot exceed {max}")]
    ScoreTooHigh { max: i16 },

    #[error("Score cannot be less than {min}")]
    ScoreTooLow { min: i16 },

    #[error("Only one review per title is allowed")]
    DuplicateReview,

    #[error("Invalid confirmation code")]
    InvalidConfirmationCode,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    #[error("Not the author of this object")]
    NotAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Slug already in use: {0}")]
    SlugAlreadyExists(String),

    #[error("A user with username {username} or email {email} is already registered")]
    SignupConflict { username: String, email: String },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::GenreNotFound(_) => "UNKNOWN_GENRE",
            Self::TitleNotFound(_) => "UNKNOWN_TITLE",
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::ValidationError(_) | Self::FieldError { .. } => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::InvalidSlug(_) => "INVALID_SLUG",
            Self::YearInFuture { .. } => "YEAR_IN_FUTURE",
            Self::ScoreTooHigh { .. } | Self::ScoreTooLow { .. } => "SCORE_OUT_OF_RANGE",
            Self::DuplicateReview => "DUPLICATE_REVIEW",
            Self::InvalidConfirmationCode => "INVALID_CONFIRMATION_CODE",

            // Authorization
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::NotAuthor => "NOT_AUTHOR",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::SlugAlreadyExists(_) => "SLUG_ALREADY_EXISTS",
            Self::SignupConflict { .. } => "SIGNUP_CONFLICT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Name of the offending request field, when the error is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::FieldError { field, .. } => Some(field),
            Self::InvalidEmail | Self::EmailAlreadyExists => Some("email"),
            Self::InvalidUsername(_) | Self::UsernameAlreadyExists => Some("username"),
            Self::InvalidSlug(_) | Self::SlugAlreadyExists(_) => Some("slug"),
            Self::YearInFuture { .. } => Some("year"),
            Self::ScoreTooHigh { .. } | Self::ScoreTooLow { .. } => Some("score"),
            Self::InvalidConfirmationCode => Some("confirmation_code"),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::GenreNotFound(_)
                | Self::TitleNotFound(_)
                | Self::ReviewNotFound(_)
                | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::FieldError { .. }
                | Self::InvalidEmail
                | Self::InvalidUsername(_)
                | Self::InvalidSlug(_)
                | Self::YearInFuture { .. }
                | Self::ScoreTooHigh { .. }
                | Self::ScoreTooLow { .. }
                | Self::DuplicateReview
                | Self::InvalidConfirmationCode
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingPermission(_) | Self::NotAuthor)
    }

    /// Check if this is a conflict error
    ///
    /// Conflicts are reported to clients as validation failures.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameAlreadyExists
                | Self::EmailAlreadyExists
                | Self::SlugAlreadyExists(_)
                | Self::SignupConflict { .. }
        )
    }
}
