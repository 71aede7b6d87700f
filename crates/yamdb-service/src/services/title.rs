//! Title service
//!
//! Reads return the nested representation with the computed rating; writes
//! take category and genre slugs and answer with slugs.

use std::collections::HashSet;

use tracing::{info, instrument};
use validator::Validate;
use yamdb_core::entities::{NewTitle, TitleChanges, User};
use yamdb_core::permissions::admin_or_read_only;
use yamdb_core::traits::{Page, PageRequest, TitleFilter};
use yamdb_core::validation::current_year;
use yamdb_core::{Access, Actor};

use crate::dto::serializers::title::serializer_for;
use crate::dto::serializers::TitleAction;
use crate::dto::{TitleResponse, TitleWriteRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Title service
pub struct TitleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TitleService<'a> {
    /// Create a new TitleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn authorize_write(caller: Option<&User>) -> ServiceResult<()> {
        let actor = caller.map(Actor::from);
        ServiceError::check(
            admin_or_read_only(actor.as_ref(), Access::Write),
            "change titles",
        )
    }

    /// List titles matching the filter
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &TitleFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<TitleResponse>> {
        let render = serializer_for(TitleAction::List).render;
        let titles = self.ctx.title_repo().list(filter, page).await?;
        Ok(titles.map(|details| render(&details)))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> ServiceResult<TitleResponse> {
        self.render(TitleAction::Retrieve, id).await
    }

    #[instrument(skip(self, caller, request))]
    pub async fn create(
        &self,
        caller: Option<&User>,
        request: TitleWriteRequest,
    ) -> ServiceResult<TitleResponse> {
        Self::authorize_write(caller)?;
        self.validate(TitleAction::Create, &request)?;

        let changes = self.resolve(request).await?;
        // validated above, so every mandatory field is present
        let new_title = NewTitle {
            name: changes.name.unwrap_or_default(),
            year: changes.year.unwrap_or_default(),
            description: changes.description.flatten(),
            category_id: changes.category_id.flatten(),
            genre_ids: changes.genre_ids.unwrap_or_default(),
        };
        let id = self.ctx.title_repo().create(&new_title).await?;
        info!(title_id = %id, "Title created");

        self.render(TitleAction::Create, id).await
    }

    /// Replace a title; name, year, genre and category are mandatory
    #[instrument(skip(self, caller, request))]
    pub async fn update(
        &self,
        caller: Option<&User>,
        id: i64,
        request: TitleWriteRequest,
    ) -> ServiceResult<TitleResponse> {
        self.write(TitleAction::Update, caller, id, request).await
    }

    /// Change only the fields present in the request
    #[instrument(skip(self, caller, request))]
    pub async fn partial_update(
        &self,
        caller: Option<&User>,
        id: i64,
        request: TitleWriteRequest,
    ) -> ServiceResult<TitleResponse> {
        self.write(TitleAction::PartialUpdate, caller, id, request).await
    }

    /// Delete a title with its reviews and their comments
    #[instrument(skip(self, caller))]
    pub async fn delete(&self, caller: Option<&User>, id: i64) -> ServiceResult<()> {
        Self::authorize_write(caller)?;
        if !self.ctx.title_repo().exists(id).await? {
            return Err(ServiceError::not_found("Title", id));
        }
        self.ctx.title_repo().delete(id).await?;
        info!(title_id = %id, "Title deleted");
        Ok(())
    }

    async fn write(
        &self,
        action: TitleAction,
        caller: Option<&User>,
        id: i64,
        request: TitleWriteRequest,
    ) -> ServiceResult<TitleResponse> {
        Self::authorize_write(caller)?;
        if !self.ctx.title_repo().exists(id).await? {
            return Err(ServiceError::not_found("Title", id));
        }
        self.validate(action, &request)?;

        let changes = self.resolve(request).await?;
        if !changes.is_empty() {
            self.ctx.title_repo().update(id, &changes).await?;
            info!(title_id = %id, "Title updated");
        }

        self.render(action, id).await
    }

    fn validate(&self, action: TitleAction, request: &TitleWriteRequest) -> ServiceResult<()> {
        request.validate()?;
        match serializer_for(action).validate {
            Some(validate) => validate(request, current_year()),
            None => Ok(()),
        }
    }

    async fn render(&self, action: TitleAction, id: i64) -> ServiceResult<TitleResponse> {
        let details = self
            .ctx
            .title_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Title", id))?;
        Ok((serializer_for(action).render)(&details))
    }

    /// Turn slugs into row IDs; an unknown slug is a field error
    async fn resolve(&self, request: TitleWriteRequest) -> ServiceResult<TitleChanges> {
        let category_id = match request.category {
            Some(slug) => {
                let category = self
                    .ctx
                    .category_repo()
                    .find_by_slug(&slug)
                    .await?
                    .ok_or_else(|| ServiceError::field("category", missing_slug(&slug)))?;
                Some(Some(category.id))
            }
            None => None,
        };

        let genre_ids = match request.genre {
            Some(slugs) => Some(self.resolve_genres(slugs).await?),
            None => None,
        };

        Ok(TitleChanges {
            name: request.name,
            year: request.year,
            description: request.description.map(Some),
            category_id,
            genre_ids,
        })
    }

    async fn resolve_genres(&self, slugs: Vec<String>) -> ServiceResult<Vec<i64>> {
        let mut seen = HashSet::new();
        let slugs: Vec<String> = slugs.into_iter().filter(|s| seen.insert(s.clone())).collect();

        let genres = self.ctx.genre_repo().find_by_slugs(&slugs).await?;
        if let Some(unknown) = slugs.iter().find(|s| !genres.iter().any(|g| g.slug == **s)) {
            return Err(ServiceError::field("genre", missing_slug(unknown)));
        }

        // keep the order the client gave
        Ok(slugs
            .iter()
            .filter_map(|s| genres.iter().find(|g| g.slug == *s).map(|g| g.id))
            .collect())
    }
}

fn missing_slug(slug: &str) -> String {
    format!("Object with slug={slug} does not exist.")
}
