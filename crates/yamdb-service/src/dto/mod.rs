//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs
//! - Per-action serializer selection for titles, reviews and user updates

pub mod mappers;
pub mod requests;
pub mod responses;
pub mod serializers;

// Re-export commonly used request types
pub use requests::{
    CommentRequest, CreateCategoryRequest, CreateGenreRequest, CreateUserRequest, ReviewRequest,
    SignupRequest, TitleWriteRequest, TokenRequest, UpdateUserRequest,
};

// Re-export commonly used response types
pub use responses::{
    CategoryResponse, CommentResponse, GenreResponse, HealthChecks, HealthResponse,
    PaginatedResponse, ReadinessResponse, ReviewResponse, SignupResponse, TitleReadResponse,
    TitleResponse, TitleWriteResponse, TokenResponse, UserResponse,
};

pub use serializers::{ReviewAction, TitleAction, UserUpdate};
