//! PostgreSQL implementation of TitleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use yamdb_core::entities::{NewTitle, TitleChanges, TitleDetails};
use yamdb_core::traits::{Page, PageRequest, RepoResult, TitleFilter, TitleRepository};

use crate::mappers::assemble_titles;
use crate::models::{TitleGenreModel, TitleModel};

use super::error::{contains_pattern, map_db_error, title_not_found};

/// Title columns joined with the category, plus the floored average score
const TITLE_SELECT: &str = r"
    SELECT t.id, t.name, t.year, t.description, t.category_id,
           c.name AS category_name, c.slug AS category_slug,
           FLOOR(AVG(r.score))::INTEGER AS rating
    FROM titles t
    LEFT JOIN categories c ON c.id = t.category_id
    LEFT JOIN reviews r ON r.title_id = t.id
";

/// Filter over `t` / `c`; $1 category slug, $2 genre slug, $3 name pattern, $4 year
const TITLE_FILTER: &str = r"
    WHERE ($1::TEXT IS NULL OR c.slug = $1)
      AND ($2::TEXT IS NULL OR EXISTS (
            SELECT 1 FROM genre_title gt
            JOIN genres g ON g.id = gt.genre_id
            WHERE gt.title_id = t.id AND g.slug = $2))
      AND ($3::TEXT IS NULL OR t.name ILIKE $3)
      AND ($4::INTEGER IS NULL OR t.year = $4)
";

/// PostgreSQL implementation of TitleRepository
#[derive(Clone)]
pub struct PgTitleRepository {
    pool: PgPool,
}

impl PgTitleRepository {
    /// Create a new PgTitleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load and attach the genres of the given title rows
    async fn with_genres(&self, rows: Vec<TitleModel>) -> RepoResult<Vec<TitleDetails>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

        let links = sqlx::query_as::<_, TitleGenreModel>(
            r"
            SELECT gt.title_id, g.id, g.name, g.slug
            FROM genre_title gt
            JOIN genres g ON g.id = gt.genre_id
            WHERE gt.title_id = ANY($1)
            ORDER BY gt.id
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(assemble_titles(rows, links))
    }
}

#[async_trait]
impl TitleRepository for PgTitleRepository {
    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: &TitleFilter,
        page: PageRequest,
    ) -> RepoResult<Page<TitleDetails>> {
        let name = filter.name.as_deref().map(contains_pattern);

        let rows = sqlx::query_as::<_, TitleModel>(&format!(
            "{TITLE_SELECT} {TITLE_FILTER} GROUP BY t.id, c.id ORDER BY t.id LIMIT $5 OFFSET $6"
        ))
        .bind(filter.category.as_deref())
        .bind(filter.genre.as_deref())
        .bind(name.as_deref())
        .bind(filter.year)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM titles t LEFT JOIN categories c ON c.id = t.category_id {TITLE_FILTER}"
        ))
        .bind(filter.category.as_deref())
        .bind(filter.genre.as_deref())
        .bind(name.as_deref())
        .bind(filter.year)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page {
            items: self.with_genres(rows).await?,
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<TitleDetails>> {
        let row = sqlx::query_as::<_, TitleModel>(&format!(
            "{TITLE_SELECT} WHERE t.id = $1 GROUP BY t.id, c.id"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.with_genres(vec![row]).await?.pop())
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: i64) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM titles WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn create(&self, title: &NewTitle) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO titles (name, year, description, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(&title.name)
        .bind(title.year)
        .bind(&title.description)
        .bind(title.category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if !title.genre_ids.is_empty() {
            sqlx::query(
                "INSERT INTO genre_title (title_id, genre_id) SELECT $1, UNNEST($2::BIGINT[])",
            )
            .bind(id)
            .bind(&title.genre_ids)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(id)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: i64, changes: &TitleChanges) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE titles
            SET name = COALESCE($2, name),
                year = COALESCE($3, year),
                description = CASE WHEN $4::BOOLEAN THEN $5::TEXT ELSE description END,
                category_id = CASE WHEN $6::BOOLEAN THEN $7::BIGINT ELSE category_id END
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(changes.year)
        .bind(changes.description.is_some())
        .bind(changes.description.clone().flatten())
        .bind(changes.category_id.is_some())
        .bind(changes.category_id.flatten())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(title_not_found(id));
        }

        if let Some(genre_ids) = &changes.genre_ids {
            sqlx::query("DELETE FROM genre_title WHERE title_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

            if !genre_ids.is_empty() {
                sqlx::query(
                    "INSERT INTO genre_title (title_id, genre_id) SELECT $1, UNNEST($2::BIGINT[])",
                )
                .bind(id)
                .bind(genre_ids)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        // genre links, reviews and their comments go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM titles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(title_not_found(id));
        }

        Ok(())
    }
}
