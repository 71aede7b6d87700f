//! Review service
//!
//! Reviews live under a title; every operation resolves the title from the
//! path first.

use tracing::{info, instrument};
use validator::Validate;
use yamdb_core::entities::{NewReview, Review, User};
use yamdb_core::permissions::{author_or_staff, authenticated_or_read_only};
use yamdb_core::traits::{Page, PageRequest};
use yamdb_core::{Access, Actor, DomainError};

use crate::dto::serializers::review::serializer_for;
use crate::dto::serializers::ReviewAction;
use crate::dto::{ReviewRequest, ReviewResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    /// Create a new ReviewService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reviews of a title, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        title_id: i64,
        page: PageRequest,
    ) -> ServiceResult<Page<ReviewResponse>> {
        self.require_title(title_id).await?;
        let render = serializer_for(ReviewAction::List).render;
        let reviews = self.ctx.review_repo().list_by_title(title_id, page).await?;
        Ok(reviews.map(|review| render(&review)))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, title_id: i64, review_id: i64) -> ServiceResult<ReviewResponse> {
        let review = self.find(title_id, review_id).await?;
        Ok((serializer_for(ReviewAction::Retrieve).render)(&review))
    }

    /// Review a title as the caller; one review per author and title
    #[instrument(skip(self, caller, request))]
    pub async fn create(
        &self,
        caller: Option<&User>,
        title_id: i64,
        request: ReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        let author = authorize_write(caller)?;
        self.require_title(title_id).await?;
        request.validate()?;

        let serializer = serializer_for(ReviewAction::Create);
        let fields = match serializer.validate {
            Some(validate) => validate(&request)?,
            None => return Err(ServiceError::internal("review create without validator")),
        };
        if serializer.one_per_author
            && self
                .ctx
                .review_repo()
                .exists_for_author(title_id, author.id)
                .await?
        {
            return Err(DomainError::DuplicateReview.into());
        }

        let review = self
            .ctx
            .review_repo()
            .create(&NewReview {
                title_id,
                author_id: author.id,
                text: fields.text.unwrap_or_default(),
                score: fields.score.unwrap_or_default(),
            })
            .await?;
        info!(review_id = %review.id, title_id = %title_id, "Review created");

        Ok((serializer.render)(&review))
    }

    /// Replace text and score
    #[instrument(skip(self, caller, request))]
    pub async fn update(
        &self,
        caller: Option<&User>,
        title_id: i64,
        review_id: i64,
        request: ReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        self.write(ReviewAction::Update, caller, title_id, review_id, request)
            .await
    }

    /// Change text and/or score
    #[instrument(skip(self, caller, request))]
    pub async fn partial_update(
        &self,
        caller: Option<&User>,
        title_id: i64,
        review_id: i64,
        request: ReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        self.write(ReviewAction::PartialUpdate, caller, title_id, review_id, request)
            .await
    }

    /// Delete a review with its comments
    #[instrument(skip(self, caller))]
    pub async fn delete(
        &self,
        caller: Option<&User>,
        title_id: i64,
        review_id: i64,
    ) -> ServiceResult<()> {
        let actor = authorize_write(caller)?;
        let review = self.find(title_id, review_id).await?;
        authorize_object(&actor, &review)?;

        self.ctx.review_repo().delete(review.id).await?;
        info!(review_id = %review.id, "Review deleted");
        Ok(())
    }

    async fn write(
        &self,
        action: ReviewAction,
        caller: Option<&User>,
        title_id: i64,
        review_id: i64,
        request: ReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        let actor = authorize_write(caller)?;
        let review = self.find(title_id, review_id).await?;
        authorize_object(&actor, &review)?;
        request.validate()?;

        let serializer = serializer_for(action);
        let fields = match serializer.validate {
            Some(validate) => validate(&request)?,
            None => return Err(ServiceError::internal("review update without validator")),
        };

        let text = fields.text.unwrap_or_else(|| review.publication.text.clone());
        let score = fields.score.unwrap_or(review.score);
        if text != review.publication.text || score != review.score {
            self.ctx.review_repo().update(review.id, &text, score).await?;
            info!(review_id = %review.id, "Review updated");
        }

        let updated = self.find(title_id, review_id).await?;
        Ok((serializer.render)(&updated))
    }

    pub(crate) async fn require_title(&self, title_id: i64) -> ServiceResult<()> {
        if self.ctx.title_repo().exists(title_id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Title", title_id))
        }
    }

    /// Resolve the title, then the review within it
    pub(crate) async fn find(&self, title_id: i64, review_id: i64) -> ServiceResult<Review> {
        self.require_title(title_id).await?;
        self.ctx
            .review_repo()
            .find_in_title(title_id, review_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Review", review_id))
    }
}

/// Writes need a caller; returns it as an actor
pub(crate) fn authorize_write(caller: Option<&User>) -> ServiceResult<Actor> {
    let actor = caller.map(Actor::from);
    ServiceError::check(
        authenticated_or_read_only(actor.as_ref(), Access::Write),
        "write here",
    )?;
    actor.ok_or(ServiceError::Unauthenticated)
}

fn authorize_object(actor: &Actor, review: &Review) -> ServiceResult<()> {
    ServiceError::check(
        author_or_staff(Some(actor), Access::Write, review.publication.author.id),
        "change this review",
    )
}
