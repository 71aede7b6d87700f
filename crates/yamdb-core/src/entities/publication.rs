//! Reviews and comments - authored publications hanging off a title

use chrono::{DateTime, Utc};

/// Author reference carried by every publication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

/// Fields shared by reviews and comments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub text: String,
    pub author: Author,
    pub pub_date: DateTime<Utc>,
}

impl Publication {
    #[inline]
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author.id == user_id
    }
}

/// Review of a title, at most one per (author, title)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    pub title_id: i64,
    pub score: i16,
    pub publication: Publication,
}

/// Comment on a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub review_id: i64,
    pub publication: Publication,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub title_id: i64,
    pub author_id: i64,
    pub text: String,
    pub score: i16,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub review_id: i64,
    pub author_id: i64,
    pub text: String,
}
