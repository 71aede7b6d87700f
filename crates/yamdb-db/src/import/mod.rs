//! Bulk import of the seed CSV files
//!
//! Files are loaded in dependency order, each inside its own transaction.
//! Rows keep their CSV ids, so the id sequences are moved past the highest
//! imported id once a file is in.

mod rows;

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{info, instrument};

use yamdb_core::entities::Role;

use rows::{CommentRow, GenreTitleRow, ReviewRow, SlugRow, TitleRow, UserRow};

/// Seed files in load order, paired with the table they fill
pub const CSV_FILES: [(&str, &str); 7] = [
    ("users.csv", "users"),
    ("genre.csv", "genres"),
    ("category.csv", "categories"),
    ("titles.csv", "titles"),
    ("genre_title.csv", "genre_title"),
    ("review.csv", "reviews"),
    ("comments.csv", "comments"),
];

/// Errors raised while importing
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{file} row {row}: {message}")]
    InvalidRow {
        file: &'static str,
        row: usize,
        message: String,
    },

    #[error("{file}: {source}")]
    Database {
        file: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Rows inserted per table
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub loaded: Vec<(&'static str, usize)>,
}

impl ImportSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.loaded.iter().map(|(_, n)| n).sum()
    }
}

/// Loads the seed CSV files from a directory
pub struct CsvImporter {
    pool: PgPool,
    data_dir: PathBuf,
}

impl CsvImporter {
    pub fn new(pool: PgPool, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            data_dir: data_dir.into(),
        }
    }

    /// Import every file of [`CSV_FILES`] in order
    ///
    /// # Errors
    /// Stops at the first unreadable file or failing insert; files already
    /// committed stay in place.
    #[instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    pub async fn load_all(&self) -> Result<ImportSummary, ImportError> {
        let mut summary = ImportSummary::default();

        for (file, table) in CSV_FILES {
            let path = self.data_dir.join(file);
            let count = match file {
                "users.csv" => self.load_users(file, &path).await?,
                "genre.csv" | "category.csv" => self.load_slugged(file, table, &path).await?,
                "titles.csv" => self.load_titles(file, &path).await?,
                "genre_title.csv" => self.load_genre_titles(file, &path).await?,
                "review.csv" => self.load_reviews(file, &path).await?,
                _ => self.load_comments(file, &path).await?,
            };
            info!(file, table, count, "Imported CSV file");
            summary.loaded.push((table, count));
        }

        Ok(summary)
    }

    async fn load_users(&self, file: &'static str, path: &Path) -> Result<usize, ImportError> {
        let rows: Vec<UserRow> = read_file(file, path)?;
        let mut tx = self.begin(file).await?;

        for (index, row) in rows.iter().enumerate() {
            let role = match row.role.as_deref() {
                None | Some("") => Role::User,
                Some(value) => value.parse().map_err(|_| ImportError::InvalidRow {
                    file,
                    row: index + 1,
                    message: format!("unknown role {value:?}"),
                })?,
            };

            sqlx::query(
                r"
                INSERT INTO users (id, username, email, role, bio, first_name, last_name)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(row.id)
            .bind(&row.username)
            .bind(&row.email)
            .bind(role.as_str())
            .bind(row.bio.as_deref().filter(|bio| !bio.is_empty()))
            .bind(row.first_name.as_deref().unwrap_or_default())
            .bind(row.last_name.as_deref().unwrap_or_default())
            .execute(&mut *tx)
            .await
            .map_err(|source| ImportError::Database { file, source })?;
        }

        self.finish(file, "users", tx).await?;
        Ok(rows.len())
    }

    async fn load_slugged(
        &self,
        file: &'static str,
        table: &'static str,
        path: &Path,
    ) -> Result<usize, ImportError> {
        let rows: Vec<SlugRow> = read_file(file, path)?;
        let mut tx = self.begin(file).await?;

        let sql = format!("INSERT INTO {table} (id, name, slug) VALUES ($1, $2, $3)");
        for row in &rows {
            sqlx::query(&sql)
                .bind(row.id)
                .bind(&row.name)
                .bind(&row.slug)
                .execute(&mut *tx)
                .await
                .map_err(|source| ImportError::Database { file, source })?;
        }

        self.finish(file, table, tx).await?;
        Ok(rows.len())
    }

    async fn load_titles(&self, file: &'static str, path: &Path) -> Result<usize, ImportError> {
        let rows: Vec<TitleRow> = read_file(file, path)?;
        let mut tx = self.begin(file).await?;

        for row in &rows {
            sqlx::query(
                "INSERT INTO titles (id, name, year, description, category_id) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(row.id)
            .bind(&row.name)
            .bind(row.year)
            .bind(row.description.as_deref().filter(|d| !d.is_empty()))
            .bind(row.category_id)
            .execute(&mut *tx)
            .await
            .map_err(|source| ImportError::Database { file, source })?;
        }

        self.finish(file, "titles", tx).await?;
        Ok(rows.len())
    }

    async fn load_genre_titles(
        &self,
        file: &'static str,
        path: &Path,
    ) -> Result<usize, ImportError> {
        let rows: Vec<GenreTitleRow> = read_file(file, path)?;
        let mut tx = self.begin(file).await?;

        for row in &rows {
            sqlx::query("INSERT INTO genre_title (id, title_id, genre_id) VALUES ($1, $2, $3)")
                .bind(row.id)
                .bind(row.title_id)
                .bind(row.genre_id)
                .execute(&mut *tx)
                .await
                .map_err(|source| ImportError::Database { file, source })?;
        }

        self.finish(file, "genre_title", tx).await?;
        Ok(rows.len())
    }

    async fn load_reviews(&self, file: &'static str, path: &Path) -> Result<usize, ImportError> {
        let rows: Vec<ReviewRow> = read_file(file, path)?;
        let mut tx = self.begin(file).await?;

        for row in &rows {
            sqlx::query(
                r"
                INSERT INTO reviews (id, title_id, author_id, text, score, pub_date)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(row.id)
            .bind(row.title_id)
            .bind(row.author_id)
            .bind(&row.text)
            .bind(row.score)
            .bind(row.pub_date)
            .execute(&mut *tx)
            .await
            .map_err(|source| ImportError::Database { file, source })?;
        }

        self.finish(file, "reviews", tx).await?;
        Ok(rows.len())
    }

    async fn load_comments(&self, file: &'static str, path: &Path) -> Result<usize, ImportError> {
        let rows: Vec<CommentRow> = read_file(file, path)?;
        let mut tx = self.begin(file).await?;

        for row in &rows {
            sqlx::query(
                r"
                INSERT INTO comments (id, review_id, author_id, text, pub_date)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(row.id)
            .bind(row.review_id)
            .bind(row.author_id)
            .bind(&row.text)
            .bind(row.pub_date)
            .execute(&mut *tx)
            .await
            .map_err(|source| ImportError::Database { file, source })?;
        }

        self.finish(file, "comments", tx).await?;
        Ok(rows.len())
    }

    async fn begin(&self, file: &'static str) -> Result<Transaction<'static, Postgres>, ImportError> {
        self.pool
            .begin()
            .await
            .map_err(|source| ImportError::Database { file, source })
    }

    /// Move the id sequence past the imported ids, then commit
    async fn finish(
        &self,
        file: &'static str,
        table: &'static str,
        mut tx: Transaction<'static, Postgres>,
    ) -> Result<(), ImportError> {
        sqlx::query(&format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
             COALESCE(MAX(id), 1), MAX(id) IS NOT NULL) FROM {table}"
        ))
        .execute(&mut *tx)
        .await
        .map_err(|source| ImportError::Database { file, source })?;

        tx.commit()
            .await
            .map_err(|source| ImportError::Database { file, source })
    }
}

fn read_file<T: DeserializeOwned>(file: &'static str, path: &Path) -> Result<Vec<T>, ImportError> {
    let handle = std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rows(file, handle)
}

/// Parse a headed CSV document into typed rows
fn parse_rows<T: DeserializeOwned, R: Read>(
    file: &'static str,
    reader: R,
) -> Result<Vec<T>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| ImportError::Csv { file, source })
}
