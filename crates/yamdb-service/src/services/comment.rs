//! Comment service

use tracing::{info, instrument};
use validator::Validate;
use yamdb_core::entities::{Comment, NewComment, User};
use yamdb_core::permissions::author_or_staff;
use yamdb_core::traits::{Page, PageRequest};
use yamdb_core::{Access, Actor};

use crate::dto::{CommentRequest, CommentResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::review::{authorize_write, ReviewService};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comments of a review, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        title_id: i64,
        review_id: i64,
        page: PageRequest,
    ) -> ServiceResult<Page<CommentResponse>> {
        let review = ReviewService::new(self.ctx).find(title_id, review_id).await?;
        let comments = self.ctx.comment_repo().list_by_review(review.id, page).await?;
        Ok(comments.map(CommentResponse::from))
    }

    #[instrument(skip(self))]
    pub async fn get(
        &self,
        title_id: i64,
        review_id: i64,
        comment_id: i64,
    ) -> ServiceResult<CommentResponse> {
        let comment = self.find(title_id, review_id, comment_id).await?;
        Ok(CommentResponse::from(comment))
    }

    #[instrument(skip(self, caller, request))]
    pub async fn create(
        &self,
        caller: Option<&User>,
        title_id: i64,
        review_id: i64,
        request: CommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let author = authorize_write(caller)?;
        let review = ReviewService::new(self.ctx).find(title_id, review_id).await?;
        request.validate()?;
        let text = request.text.ok_or_else(|| ServiceError::required("text"))?;

        let comment = self
            .ctx
            .comment_repo()
            .create(&NewComment {
                review_id: review.id,
                author_id: author.id,
                text,
            })
            .await?;
        info!(comment_id = %comment.id, review_id = %review.id, "Comment created");

        Ok(CommentResponse::from(comment))
    }

    /// Replace the text
    #[instrument(skip(self, caller, request))]
    pub async fn update(
        &self,
        caller: Option<&User>,
        title_id: i64,
        review_id: i64,
        comment_id: i64,
        request: CommentRequest,
    ) -> ServiceResult<CommentResponse> {
        self.write(false, caller, title_id, review_id, comment_id, request)
            .await
    }

    /// Same as [`Self::update`], but a missing text leaves the comment alone
    #[instrument(skip(self, caller, request))]
    pub async fn partial_update(
        &self,
        caller: Option<&User>,
        title_id: i64,
        review_id: i64,
        comment_id: i64,
        request: CommentRequest,
    ) -> ServiceResult<CommentResponse> {
        self.write(true, caller, title_id, review_id, comment_id, request)
            .await
    }

    #[instrument(skip(self, caller))]
    pub async fn delete(
        &self,
        caller: Option<&User>,
        title_id: i64,
        review_id: i64,
        comment_id: i64,
    ) -> ServiceResult<()> {
        let actor = authorize_write(caller)?;
        let comment = self.find(title_id, review_id, comment_id).await?;
        authorize_object(&actor, &comment)?;

        self.ctx.comment_repo().delete(comment.id).await?;
        info!(comment_id = %comment.id, "Comment deleted");
        Ok(())
    }

    async fn write(
        &self,
        partial: bool,
        caller: Option<&User>,
        title_id: i64,
        review_id: i64,
        comment_id: i64,
        request: CommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let actor = authorize_write(caller)?;
        let comment = self.find(title_id, review_id, comment_id).await?;
        authorize_object(&actor, &comment)?;
        request.validate()?;

        let text = match request.text {
            Some(text) => text,
            None if partial => return Ok(CommentResponse::from(comment)),
            None => return Err(ServiceError::required("text")),
        };
        if text != comment.publication.text {
            self.ctx.comment_repo().update(comment.id, &text).await?;
            info!(comment_id = %comment.id, "Comment updated");
        }

        let updated = self.find(title_id, review_id, comment_id).await?;
        Ok(CommentResponse::from(updated))
    }

    /// Resolve title, then review, then the comment within it
    async fn find(&self, title_id: i64, review_id: i64, comment_id: i64) -> ServiceResult<Comment> {
        let review = ReviewService::new(self.ctx).find(title_id, review_id).await?;
        self.ctx
            .comment_repo()
            .find_in_review(review.id, comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id))
    }
}

fn authorize_object(actor: &Actor, comment: &Comment) -> ServiceResult<()> {
    ServiceError::check(
        author_or_staff(Some(actor), Access::Write, comment.publication.author.id),
        "change this comment",
    )
}
