//! # yamdb-api
//!
//! REST API server built with Axum framework.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{
    build_service_context, connect_database, create_app, create_app_state,
    create_app_state_with_mailer, run, run_server,
};
pub use middleware::App;
pub use state::AppState;
