//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::Request, ServiceExt};
use tokio::net::TcpListener;
use tracing::info;
use yamdb_common::{build_mailer, AppConfig, AppError, ConfirmationCodes, JwtService, Mailer};
use yamdb_db::{
    create_pool, run_migrations, PgCategoryRepository, PgCommentRepository, PgGenreRepository,
    PgPool, PgReviewRepository, PgTitleRepository, PgUserRepository,
};
use yamdb_service::{ServiceContext, ServiceContextBuilder};

use crate::middleware::{apply_middleware, normalize_paths, App};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> App {
    let router = create_router().merge(health_routes());
    let config = state.config();
    let router = apply_middleware(router, &config.server, &config.cors);
    normalize_paths(router.with_state(state))
}

/// Connect to PostgreSQL and bring the schema up to date if configured
pub async fn connect_database(config: &AppConfig) -> Result<PgPool, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&yamdb_db::DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        info!(dir = %config.database.migrations_dir, "Migrations applied");
    }

    Ok(pool)
}

/// Wire repositories, token services and the mailer together
pub fn build_service_context(
    config: &AppConfig,
    pool: PgPool,
    mailer: Arc<dyn Mailer>,
) -> Result<ServiceContext, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let confirmation_codes = Arc::new(ConfirmationCodes::new(
        &config.jwt.secret,
        config.auth.confirmation_code_ttl_secs,
    ));

    ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .category_repo(Arc::new(PgCategoryRepository::new(pool.clone())))
        .genre_repo(Arc::new(PgGenreRepository::new(pool.clone())))
        .title_repo(Arc::new(PgTitleRepository::new(pool.clone())))
        .review_repo(Arc::new(PgReviewRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .pool(pool)
        .jwt_service(jwt_service)
        .confirmation_codes(confirmation_codes)
        .mailer(mailer)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let mailer = build_mailer(&config.mail)?;
    info!(backend = ?config.mail.backend, "Mail transport ready");
    create_app_state_with_mailer(config, mailer).await
}

/// Same as [`create_app_state`] with a caller-provided mail transport
pub async fn create_app_state_with_mailer(
    config: AppConfig,
    mailer: Arc<dyn Mailer>,
) -> Result<AppState, AppError> {
    let pool = connect_database(&config).await?;
    let service_context = build_service_context(&config, pool, mailer)?;
    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: App, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
