//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod genres;
pub mod health;
pub mod reviews;
pub mod titles;
pub mod users;
