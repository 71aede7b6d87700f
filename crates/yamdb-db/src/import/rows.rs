//! Row shapes of the seed CSV files
//!
//! `category` and `author` columns land in `category_id` / `author_id`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Shared by category.csv and genre.csv
#[derive(Debug, Deserialize)]
pub struct SlugRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleRow {
    pub id: i64,
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "category", default)]
    pub category_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct GenreTitleRow {
    pub id: i64,
    pub title_id: i64,
    pub genre_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRow {
    pub id: i64,
    pub title_id: i64,
    pub text: String,
    #[serde(alias = "author")]
    pub author_id: i64,
    pub score: i16,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRow {
    pub id: i64,
    pub review_id: i64,
    pub text: String,
    #[serde(alias = "author")]
    pub author_id: i64,
    pub pub_date: DateTime<Utc>,
}
