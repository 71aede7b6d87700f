//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Field rules shared with the import tooling live in
//! `yamdb_core::validation` and are bridged in through `custom` validators.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};
use yamdb_core::validation;
use yamdb_core::{DomainError, Role};

fn rule_error(code: &'static str, err: DomainError) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(err.to_string()))
}

fn username_rule(value: &str) -> Result<(), ValidationError> {
    validation::validate_username(value).map_err(|e| rule_error("username", e))
}

fn email_rule(value: &str) -> Result<(), ValidationError> {
    validation::validate_email(value).map_err(|e| rule_error("email", e))
}

fn slug_rule(value: &str) -> Result<(), ValidationError> {
    validation::validate_slug(value).map_err(|e| rule_error("slug", e))
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("This field may not be blank.")));
    }
    Ok(())
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Signup request: creates the account if needed and mails a code
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(custom(function = "email_rule"))]
    pub email: String,

    #[validate(custom(function = "username_rule"))]
    pub username: String,
}

/// Exchange of a confirmation code for an access token
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Confirmation code must be 1-100 characters"
    ))]
    pub confirmation_code: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Admin creation of an account
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom(function = "username_rule"))]
    pub username: String,

    #[validate(custom(function = "email_rule"))]
    pub email: String,

    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: Option<String>,

    pub bio: Option<String>,

    pub role: Option<Role>,
}

/// Partial update of an account; every field is optional
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "username_rule"))]
    pub username: Option<String>,

    #[validate(custom(function = "email_rule"))]
    pub email: Option<String>,

    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: Option<String>,

    pub bio: Option<String>,

    pub role: Option<Role>,
}

// ============================================================================
// Catalogue Requests
// ============================================================================

/// Create category request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(custom(function = "slug_rule"))]
    pub slug: String,
}

/// Create genre request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGenreRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(custom(function = "slug_rule"))]
    pub slug: String,
}

/// Title write body, shared by create, full and partial update
///
/// Which fields are mandatory depends on the action, see
/// [`crate::dto::serializers::title::serializer_for`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TitleWriteRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    pub year: Option<i32>,

    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,

    /// Genre slugs
    pub genre: Option<Vec<String>>,

    /// Category slug
    pub category: Option<String>,
}

// ============================================================================
// Publication Requests
// ============================================================================

/// Review write body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(custom(function = "not_blank"))]
    pub text: Option<String>,

    /// Checked against the score range by the review serializer
    pub score: Option<i64>,
}

/// Comment write body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(custom(function = "not_blank"))]
    pub text: Option<String>,
}
