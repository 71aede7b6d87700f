//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Catalogue rows
//! are exposed without their numeric id; titles, reviews and comments carry it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use yamdb_core::Role;

// ============================================================================
// Common Response Types
// ============================================================================

/// Limit/offset page envelope
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn new(results: Vec<T>, count: i64, next: Option<String>, previous: Option<String>) -> Self {
        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Echo of an accepted signup
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SignupResponse {
    pub email: String,
    pub username: String,
}

/// Issued access token
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub role: Role,
}

// ============================================================================
// Catalogue Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryResponse {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenreResponse {
    pub name: String,
    pub slug: String,
}

/// Title as returned by list and retrieve
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TitleReadResponse {
    pub id: i64,
    pub name: String,
    pub year: i32,
    pub rating: Option<i32>,
    pub description: Option<String>,
    pub genre: Vec<GenreResponse>,
    pub category: Option<CategoryResponse>,
}

/// Title as returned by create and update, relations as slugs
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TitleWriteResponse {
    pub id: i64,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub genre: Vec<String>,
    pub category: Option<String>,
}

/// Either title shape, chosen per action
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TitleResponse {
    Read(TitleReadResponse),
    Write(TitleWriteResponse),
}

impl TitleResponse {
    pub fn id(&self) -> i64 {
        match self {
            Self::Read(t) => t.id,
            Self::Write(t) => t.id,
        }
    }
}

// ============================================================================
// Publication Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReviewResponse {
    pub id: i64,
    pub text: String,
    /// Author username
    pub author: String,
    pub score: i16,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommentResponse {
    pub id: i64,
    pub text: String,
    /// Author username
    pub author: String,
    pub pub_date: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
