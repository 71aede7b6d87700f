//! Review serializer dispatch
//!
//! Creating a review additionally enforces one review per author and title.

use yamdb_core::entities::Review;
use yamdb_core::validation::validate_score;

use crate::dto::requests::ReviewRequest;
use crate::dto::responses::ReviewResponse;
use crate::services::{ServiceError, ServiceResult};

/// What is being done to a review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
}

/// Checked review fields; `None` leaves the stored value alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFields {
    pub text: Option<String>,
    pub score: Option<i16>,
}

/// Validation and rendering used for one action
#[derive(Debug, Clone, Copy)]
pub struct ReviewSerializer {
    /// Body check, `None` for actions without a body
    pub validate: Option<fn(&ReviewRequest) -> ServiceResult<ReviewFields>>,
    /// Reject a second review of the same title by the same author
    pub one_per_author: bool,
    pub render: fn(&Review) -> ReviewResponse,
}

pub fn serializer_for(action: ReviewAction) -> ReviewSerializer {
    match action {
        ReviewAction::List | ReviewAction::Retrieve | ReviewAction::Destroy => ReviewSerializer {
            validate: None,
            one_per_author: false,
            render,
        },
        ReviewAction::Create => ReviewSerializer {
            validate: Some(validate_full),
            one_per_author: true,
            render,
        },
        ReviewAction::Update => ReviewSerializer {
            validate: Some(validate_full),
            one_per_author: false,
            render,
        },
        ReviewAction::PartialUpdate => ReviewSerializer {
            validate: Some(validate_partial),
            one_per_author: false,
            render,
        },
    }
}

fn render(review: &Review) -> ReviewResponse {
    ReviewResponse::from(review)
}

fn validate_full(request: &ReviewRequest) -> ServiceResult<ReviewFields> {
    if request.text.is_none() {
        return Err(ServiceError::required("text"));
    }
    if request.score.is_none() {
        return Err(ServiceError::required("score"));
    }
    validate_partial(request)
}

fn validate_partial(request: &ReviewRequest) -> ServiceResult<ReviewFields> {
    let score = request.score.map(validate_score).transpose()?;
    Ok(ReviewFields {
        text: request.text.clone(),
        score,
    })
}
