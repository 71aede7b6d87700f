//! PostgreSQL implementation of GenreRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use yamdb_core::entities::{Genre, NewGenre};
use yamdb_core::error::DomainError;
use yamdb_core::traits::{GenreRepository, Page, PageRequest, RepoResult};

use crate::models::GenreModel;

use super::error::{contains_pattern, genre_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of GenreRepository
#[derive(Clone)]
pub struct PgGenreRepository {
    pool: PgPool,
}

impl PgGenreRepository {
    /// Create a new PgGenreRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreRepository for PgGenreRepository {
    #[instrument(skip(self))]
    async fn list(&self, search: Option<&str>, page: PageRequest) -> RepoResult<Page<Genre>> {
        let pattern = search.map(contains_pattern);

        let rows = sqlx::query_as::<_, GenreModel>(
            r"
            SELECT id, name, slug
            FROM genres
            WHERE ($1::TEXT IS NULL OR name ILIKE $1)
            ORDER BY name, id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(pattern.as_deref())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM genres WHERE ($1::TEXT IS NULL OR name ILIKE $1)",
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page {
            items: rows.into_iter().map(Genre::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Genre>> {
        let result =
            sqlx::query_as::<_, GenreModel>("SELECT id, name, slug FROM genres WHERE slug = $1")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.map(Genre::from))
    }

    #[instrument(skip(self))]
    async fn find_by_slugs(&self, slugs: &[String]) -> RepoResult<Vec<Genre>> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, GenreModel>(
            "SELECT id, name, slug FROM genres WHERE slug = ANY($1) ORDER BY id",
        )
        .bind(slugs)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Genre::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, genre: &NewGenre) -> RepoResult<Genre> {
        let row = sqlx::query_as::<_, GenreModel>(
            r"
            INSERT INTO genres (name, slug)
            VALUES ($1, $2)
            RETURNING id, name, slug
            ",
        )
        .bind(&genre.name)
        .bind(&genre.slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugAlreadyExists(genre.slug.clone())))?;

        Ok(Genre::from(row))
    }

    #[instrument(skip(self))]
    async fn delete(&self, slug: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM genres WHERE slug = $1")
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(genre_not_found(slug));
        }

        Ok(())
    }
}
