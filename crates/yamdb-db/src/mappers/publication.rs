//! Review / comment model -> entity mappers

use yamdb_core::entities::{Author, Comment, Publication, Review};

use crate::models::{CommentModel, ReviewModel};

impl From<ReviewModel> for Review {
    fn from(model: ReviewModel) -> Self {
        Review {
            id: model.id,
            title_id: model.title_id,
            score: model.score,
            publication: Publication {
                text: model.text,
                author: Author {
                    id: model.author_id,
                    username: model.author_username,
                },
                pub_date: model.pub_date,
            },
        }
    }
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: model.id,
            review_id: model.review_id,
            publication: Publication {
                text: model.text,
                author: Author {
                    id: model.author_id,
                    username: model.author_username,
                },
                pub_date: model.pub_date,
            },
        }
    }
}
