//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use yamdb_core::entities::{Comment, NewComment};
use yamdb_core::traits::{CommentRepository, Page, PageRequest, RepoResult};

use crate::models::CommentModel;

use super::error::{comment_not_found, map_db_error};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn list_by_review(
        &self,
        review_id: i64,
        page: PageRequest,
    ) -> RepoResult<Page<Comment>> {
        let rows = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT c.id, c.review_id, c.author_id, u.username AS author_username,
                   c.text, c.pub_date
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.review_id = $1
            ORDER BY c.pub_date DESC, c.id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(review_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE review_id = $1")
                .bind(review_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(Page {
            items: rows.into_iter().map(Comment::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_in_review(
        &self,
        review_id: i64,
        comment_id: i64,
    ) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT c.id, c.review_id, c.author_id, u.username AS author_username,
                   c.text, c.pub_date
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.id = $1 AND c.review_id = $2
            ",
        )
        .bind(comment_id)
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, comment), fields(review_id = comment.review_id, author_id = comment.author_id))]
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let row = sqlx::query_as::<_, CommentModel>(
            r"
            WITH inserted AS (
                INSERT INTO comments (review_id, author_id, text)
                VALUES ($1, $2, $3)
                RETURNING id, review_id, author_id, text, pub_date
            )
            SELECT i.id, i.review_id, i.author_id, u.username AS author_username,
                   i.text, i.pub_date
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            ",
        )
        .bind(comment.review_id)
        .bind(comment.author_id)
        .bind(&comment.text)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Comment::from(row))
    }

    #[instrument(skip(self, text))]
    async fn update(&self, id: i64, text: &str) -> RepoResult<()> {
        let result = sqlx::query("UPDATE comments SET text = $2 WHERE id = $1")
            .bind(id)
            .bind(text)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }
}
