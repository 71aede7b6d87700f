//! Test fixtures and data generators
//!
//! Request bodies with unique identifiers plus the response shapes the
//! tests read back.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
///
/// Combines the process ID with a counter so parallel test binaries sharing
/// one database do not collide.
pub fn unique_suffix() -> String {
    format!("{}x{}", std::process::id(), COUNTER.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Auth
// ============================================================================

/// Signup request
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
}

impl SignupRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("reader{suffix}@example.com"),
            username: format!("reader{suffix}"),
        }
    }
}

/// Signup echo
#[derive(Debug, Deserialize)]
pub struct SignupResponse {
    pub email: String,
    pub username: String,
}

/// Token request
#[derive(Debug, Serialize)]
pub struct TokenRequest {
    pub username: String,
    pub confirmation_code: String,
}

/// Token response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Users
// ============================================================================

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub role: String,
}

// ============================================================================
// Catalogue
// ============================================================================

/// Category or genre body and response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlugItem {
    pub name: String,
    pub slug: String,
}

impl SlugItem {
    pub fn unique(kind: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("{kind} {suffix}"),
            slug: format!("{kind}-{suffix}"),
        }
    }
}

/// Title write body
#[derive(Debug, Clone, Serialize)]
pub struct TitleRequest {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub genre: Vec<String>,
    pub category: String,
}

impl TitleRequest {
    pub fn new(year: i32, category: &SlugItem, genres: &[&SlugItem]) -> Self {
        Self {
            name: format!("Title {}", unique_suffix()),
            year,
            description: Some("Integration test title".to_string()),
            genre: genres.iter().map(|g| g.slug.clone()).collect(),
            category: category.slug.clone(),
        }
    }
}

/// Title as written: slugs only
#[derive(Debug, Deserialize)]
pub struct TitleWriteResponse {
    pub id: i64,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub genre: Vec<String>,
    pub category: Option<String>,
}

/// Title as read: nested catalogue rows and the rating
#[derive(Debug, Deserialize)]
pub struct TitleReadResponse {
    pub id: i64,
    pub name: String,
    pub year: i32,
    pub rating: Option<i32>,
    pub description: Option<String>,
    pub genre: Vec<SlugItem>,
    pub category: Option<SlugItem>,
}

// ============================================================================
// Publications
// ============================================================================

/// Review body
#[derive(Debug, Serialize)]
pub struct ReviewRequest {
    pub text: String,
    pub score: i64,
}

impl ReviewRequest {
    pub fn new(score: i64) -> Self {
        Self {
            text: format!("Scored {score}"),
            score,
        }
    }
}

/// Review response
#[derive(Debug, Deserialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub score: i16,
    pub pub_date: String,
}

/// Comment body
#[derive(Debug, Serialize)]
pub struct CommentRequest {
    pub text: String,
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub pub_date: String,
}

/// List envelope
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
