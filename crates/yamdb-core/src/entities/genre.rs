//! Genre entity

/// Genre attached to titles through the `genre_title` association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Data needed to create a genre
#[derive(Debug, Clone)]
pub struct NewGenre {
    pub name: String,
    pub slug: String,
}
