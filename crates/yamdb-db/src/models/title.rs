//! Title database models

use sqlx::FromRow;

/// Title row joined with its category and aggregated rating
#[derive(Debug, Clone, FromRow)]
pub struct TitleModel {
    pub id: i64,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub rating: Option<i32>,
}

/// One genre linked to a title through genre_title
#[derive(Debug, Clone, FromRow)]
pub struct TitleGenreModel {
    pub title_id: i64,
    pub id: i64,
    pub name: String,
    pub slug: String,
}
