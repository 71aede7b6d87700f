//! Review and comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Review row joined with the author's username
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub id: i64,
    pub title_id: i64,
    pub author_id: i64,
    pub author_username: String,
    pub text: String,
    pub score: i16,
    pub pub_date: DateTime<Utc>,
}

/// Comment row joined with the author's username
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub review_id: i64,
    pub author_id: i64,
    pub author_username: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}
