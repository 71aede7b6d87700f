//! # yamdb-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use services::{
    AuthService, CategoryService, CommentService, GenreService, ReviewService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, TitleService, UserService,
};
