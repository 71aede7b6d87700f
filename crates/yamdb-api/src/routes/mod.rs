//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{auth, categories, comments, genres, health, reviews, titles, users};
use crate::state::AppState;

/// Create the main API router with all routes (health is separate)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(catalogue_routes())
        .merge(title_routes())
}

/// Signup and token exchange
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/token", post(auth::token))
}

/// User routes; `/users/me` wins over the username segment
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/me", get(users::get_me).patch(users::update_me))
        .route(
            "/users/:username",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
}

/// Categories and genres: list, create, delete by slug
fn catalogue_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/categories/:slug", delete(categories::delete_category))
        .route("/genres", get(genres::list_genres).post(genres::create_genre))
        .route("/genres/:slug", delete(genres::delete_genre))
}

/// Titles with their reviews and comments
fn title_routes() -> Router<AppState> {
    Router::new()
        .route("/titles", get(titles::list_titles).post(titles::create_title))
        .route(
            "/titles/:title_id",
            get(titles::get_title)
                .put(titles::update_title)
                .patch(titles::patch_title)
                .delete(titles::delete_title),
        )
        .route(
            "/titles/:title_id/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/titles/:title_id/reviews/:review_id",
            get(reviews::get_review)
                .put(reviews::update_review)
                .patch(reviews::patch_review)
                .delete(reviews::delete_review),
        )
        .route(
            "/titles/:title_id/reviews/:review_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/titles/:title_id/reviews/:review_id/comments/:comment_id",
            get(comments::get_comment)
                .put(comments::update_comment)
                .patch(comments::patch_comment)
                .delete(comments::delete_comment),
        )
}
