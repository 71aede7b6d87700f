//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use yamdb_core::error::DomainError;

/// Convert SQLx error to DomainError
///
/// A dangling reference is a client input problem, anything else is a
/// database failure.
pub fn map_db_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return DomainError::ValidationError(format!(
                "referenced object does not exist ({})",
                db_err.constraint().unwrap_or("foreign key")
            ));
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Users carry two unique columns; tell them apart by constraint name
pub fn map_user_unique_violation(e: SqlxError) -> DomainError {
    let constraint = e
        .as_database_error()
        .filter(|db_err| db_err.is_unique_violation())
        .and_then(|db_err| db_err.constraint().map(str::to_owned));

    match constraint.as_deref() {
        Some("users_username_key") => DomainError::UsernameAlreadyExists,
        Some("users_email_key") => DomainError::EmailAlreadyExists,
        _ => map_db_error(e),
    }
}

/// Create a "user not found" error
pub fn user_not_found(username: &str) -> DomainError {
    DomainError::UserNotFound(username.to_string())
}

/// Create a "category not found" error
pub fn category_not_found(slug: &str) -> DomainError {
    DomainError::CategoryNotFound(slug.to_string())
}

/// Create a "genre not found" error
pub fn genre_not_found(slug: &str) -> DomainError {
    DomainError::GenreNotFound(slug.to_string())
}

/// Create a "title not found" error
pub fn title_not_found(id: i64) -> DomainError {
    DomainError::TitleNotFound(id)
}

/// Create a "review not found" error
pub fn review_not_found(id: i64) -> DomainError {
    DomainError::ReviewNotFound(id)
}

/// Create a "comment not found" error
pub fn comment_not_found(id: i64) -> DomainError {
    DomainError::CommentNotFound(id)
}

/// Build an `ILIKE` pattern matching `needle` anywhere, with wildcards escaped
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
