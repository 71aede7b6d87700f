//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use yamdb_core::entities::{NewReview, Review};
use yamdb_core::error::DomainError;
use yamdb_core::traits::{Page, PageRequest, RepoResult, ReviewRepository};

use crate::models::ReviewModel;

use super::error::{map_db_error, map_unique_violation, review_not_found};

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn list_by_title(&self, title_id: i64, page: PageRequest) -> RepoResult<Page<Review>> {
        let rows = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT r.id, r.title_id, r.author_id, u.username AS author_username,
                   r.text, r.score, r.pub_date
            FROM reviews r
            JOIN users u ON u.id = r.author_id
            WHERE r.title_id = $1
            ORDER BY r.pub_date DESC, r.id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(title_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE title_id = $1")
            .bind(title_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page {
            items: rows.into_iter().map(Review::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_in_title(&self, title_id: i64, review_id: i64) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT r.id, r.title_id, r.author_id, u.username AS author_username,
                   r.text, r.score, r.pub_date
            FROM reviews r
            JOIN users u ON u.id = r.author_id
            WHERE r.id = $1 AND r.title_id = $2
            ",
        )
        .bind(review_id)
        .bind(title_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Review::from))
    }

    #[instrument(skip(self))]
    async fn exists_for_author(&self, title_id: i64, author_id: i64) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE title_id = $1 AND author_id = $2)",
        )
        .bind(title_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, review), fields(title_id = review.title_id, author_id = review.author_id))]
    async fn create(&self, review: &NewReview) -> RepoResult<Review> {
        let row = sqlx::query_as::<_, ReviewModel>(
            r"
            WITH inserted AS (
                INSERT INTO reviews (title_id, author_id, text, score)
                VALUES ($1, $2, $3, $4)
                RETURNING id, title_id, author_id, text, score, pub_date
            )
            SELECT i.id, i.title_id, i.author_id, u.username AS author_username,
                   i.text, i.score, i.pub_date
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            ",
        )
        .bind(review.title_id)
        .bind(review.author_id)
        .bind(&review.text)
        .bind(review.score)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateReview))?;

        Ok(Review::from(row))
    }

    #[instrument(skip(self, text))]
    async fn update(&self, id: i64, text: &str, score: i16) -> RepoResult<()> {
        let result = sqlx::query("UPDATE reviews SET text = $2, score = $3 WHERE id = $1")
            .bind(id)
            .bind(text)
            .bind(score)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(review_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(review_not_found(id));
        }

        Ok(())
    }
}
