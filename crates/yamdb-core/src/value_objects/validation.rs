//! Field rules shared by request validation and import tooling

use chrono::{Datelike, Utc};
use validator::ValidateEmail;

use crate::error::DomainError;

pub const USERNAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PERSON_NAME_MAX_LEN: usize = 150;
pub const NAME_MAX_LEN: usize = 200;
pub const SLUG_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 255;
pub const CONFIRMATION_CODE_MAX_LEN: usize = 100;
pub const SCORE_MIN: i16 = 1;
pub const SCORE_MAX: i16 = 10;

/// Username reserved for the self-profile route
pub const RESERVED_USERNAME: &str = "me";

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-')
}

/// Username must not be `me`, must be 1-150 characters of letters, digits and `.@+-_`
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.is_empty() {
        return Err(DomainError::InvalidUsername("username may not be blank".to_string()));
    }
    if username.eq_ignore_ascii_case(RESERVED_USERNAME) {
        return Err(DomainError::InvalidUsername(format!(
            "\"{username}\" is reserved"
        )));
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(DomainError::InvalidUsername(format!(
            "username must be at most {USERNAME_MAX_LEN} characters"
        )));
    }
    if let Some(bad) = username.chars().find(|c| !is_username_char(*c)) {
        return Err(DomainError::InvalidUsername(format!(
            "character {bad:?} is not allowed"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.len() > EMAIL_MAX_LEN || !email.validate_email() {
        return Err(DomainError::InvalidEmail);
    }
    Ok(())
}

/// Slugs are 1-50 ASCII letters, digits, `-` or `_`
pub fn validate_slug(slug: &str) -> Result<(), DomainError> {
    let valid = !slug.is_empty()
        && slug.len() <= SLUG_MAX_LEN
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidSlug(slug.to_string()))
    }
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Release year may not lie in the future
pub fn validate_year(year: i32, current_year: i32) -> Result<(), DomainError> {
    if year > current_year {
        return Err(DomainError::YearInFuture {
            year,
            max: current_year,
        });
    }
    Ok(())
}

pub fn validate_score(score: i64) -> Result<i16, DomainError> {
    if score > i64::from(SCORE_MAX) {
        return Err(DomainError::ScoreTooHigh { max: SCORE_MAX });
    }
    if score < i64::from(SCORE_MIN) {
        return Err(DomainError::ScoreTooLow { min: SCORE_MIN });
    }
    Ok(score as i16)
}
