//! # yamdb-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `yamdb-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//! - Bulk import of the seed CSV files
//!
//! ## Usage
//!
//! ```rust,ignore
//! use yamdb_db::pool::{create_pool, DatabaseConfig};
//! use yamdb_db::repositories::PgTitleRepository;
//! use yamdb_core::traits::{PageRequest, TitleFilter, TitleRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let app_config = yamdb_common::AppConfig::from_env()?;
//!     let pool = create_pool(&DatabaseConfig::from(&app_config.database)).await?;
//!     let titles = PgTitleRepository::new(pool);
//!
//!     let page = titles.list(&TitleFilter::default(), PageRequest::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod import;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use import::{CsvImporter, ImportError, ImportSummary};
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCategoryRepository, PgCommentRepository, PgGenreRepository, PgReviewRepository,
    PgTitleRepository, PgUserRepository,
};
