//! Genre service

use tracing::{info, instrument};
use validator::Validate;
use yamdb_core::entities::{NewGenre, User};
use yamdb_core::permissions::admin_or_read_only;
use yamdb_core::traits::{Page, PageRequest};
use yamdb_core::{Access, Actor};

use crate::dto::{CreateGenreRequest, GenreResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Genre service
pub struct GenreService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GenreService<'a> {
    /// Create a new GenreService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List genres, optionally by name substring
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Page<GenreResponse>> {
        let genres = self.ctx.genre_repo().list(search, page).await?;
        Ok(genres.map(GenreResponse::from))
    }

    #[instrument(skip(self, caller, request), fields(slug = %request.slug))]
    pub async fn create(
        &self,
        caller: Option<&User>,
        request: CreateGenreRequest,
    ) -> ServiceResult<GenreResponse> {
        let actor = caller.map(Actor::from);
        ServiceError::check(admin_or_read_only(actor.as_ref(), Access::Write), "create genres")?;
        request.validate()?;

        let genre = self
            .ctx
            .genre_repo()
            .create(&NewGenre {
                name: request.name,
                slug: request.slug,
            })
            .await?;
        info!(genre_id = %genre.id, "Genre created");

        Ok(GenreResponse::from(genre))
    }

    /// Delete by slug, unlinking it from every title
    #[instrument(skip(self, caller))]
    pub async fn delete(&self, caller: Option<&User>, slug: &str) -> ServiceResult<()> {
        let actor = caller.map(Actor::from);
        ServiceError::check(admin_or_read_only(actor.as_ref(), Access::Write), "delete genres")?;

        self.ctx.genre_repo().delete(slug).await?;
        info!(slug = %slug, "Genre deleted");
        Ok(())
    }
}
