//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use yamdb_core::entities::{Category, Comment, Genre, Review, TitleDetails, User};

use super::responses::{
    CategoryResponse, CommentResponse, GenreResponse, ReviewResponse, TitleReadResponse,
    TitleWriteResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            role: user.effective_role(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Catalogue Mappers
// ============================================================================

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            name: category.name,
            slug: category.slug,
        }
    }
}

impl From<&Genre> for GenreResponse {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
            slug: genre.slug.clone(),
        }
    }
}

impl From<Genre> for GenreResponse {
    fn from(genre: Genre) -> Self {
        Self {
            name: genre.name,
            slug: genre.slug,
        }
    }
}

impl From<&TitleDetails> for TitleReadResponse {
    fn from(details: &TitleDetails) -> Self {
        Self {
            id: details.title.id,
            name: details.title.name.clone(),
            year: details.title.year,
            rating: details.rating,
            description: details.title.description.clone(),
            genre: details.genres.iter().map(GenreResponse::from).collect(),
            category: details.category.as_ref().map(CategoryResponse::from),
        }
    }
}

impl From<&TitleDetails> for TitleWriteResponse {
    fn from(details: &TitleDetails) -> Self {
        Self {
            id: details.title.id,
            name: details.title.name.clone(),
            year: details.title.year,
            description: details.title.description.clone(),
            genre: details.genre_slugs(),
            category: details.category.as_ref().map(|c| c.slug.clone()),
        }
    }
}

// ============================================================================
// Publication Mappers
// ============================================================================

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            text: review.publication.text.clone(),
            author: review.publication.author.username.clone(),
            score: review.score,
            pub_date: review.publication.pub_date,
        }
    }
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self::from(&review)
    }
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.publication.text.clone(),
            author: comment.publication.author.username.clone(),
            pub_date: comment.publication.pub_date,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}
