//! Title entity - a catalogued work that can be reviewed

use super::{Category, Genre};

/// Stored title row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub id: i64,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: Option<i64>,
}

/// Title together with its related rows and computed rating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleDetails {
    pub title: Title,
    pub category: Option<Category>,
    pub genres: Vec<Genre>,
    /// Integer part of the average review score, `None` without reviews
    pub rating: Option<i32>,
}

impl TitleDetails {
    pub fn id(&self) -> i64 {
        self.title.id
    }

    pub fn genre_slugs(&self) -> Vec<String> {
        self.genres.iter().map(|g| g.slug.clone()).collect()
    }
}

/// Data needed to create a title
#[derive(Debug, Clone)]
pub struct NewTitle {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub genre_ids: Vec<i64>,
}

/// Partial title update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct TitleChanges {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<i64>>,
    pub genre_ids: Option<Vec<i64>>,
}

impl TitleChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.year.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.genre_ids.is_none()
    }
}
