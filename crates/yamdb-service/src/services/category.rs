//! Category service

use tracing::{info, instrument};
use validator::Validate;
use yamdb_core::entities::{NewCategory, User};
use yamdb_core::permissions::admin_or_read_only;
use yamdb_core::traits::{Page, PageRequest};
use yamdb_core::{Access, Actor};

use crate::dto::{CategoryResponse, CreateCategoryRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Category service
pub struct CategoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryService<'a> {
    /// Create a new CategoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn authorize_write(caller: Option<&User>) -> ServiceResult<()> {
        let actor = caller.map(Actor::from);
        ServiceError::check(
            admin_or_read_only(actor.as_ref(), Access::Write),
            "change categories",
        )
    }

    /// List categories, optionally by name substring
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Page<CategoryResponse>> {
        let categories = self.ctx.category_repo().list(search, page).await?;
        Ok(categories.map(CategoryResponse::from))
    }

    #[instrument(skip(self, caller, request), fields(slug = %request.slug))]
    pub async fn create(
        &self,
        caller: Option<&User>,
        request: CreateCategoryRequest,
    ) -> ServiceResult<CategoryResponse> {
        Self::authorize_write(caller)?;
        request.validate()?;

        let category = self
            .ctx
            .category_repo()
            .create(&NewCategory {
                name: request.name,
                slug: request.slug,
            })
            .await?;
        info!(category_id = %category.id, "Category created");

        Ok(CategoryResponse::from(category))
    }

    /// Delete by slug; titles in the category keep existing without one
    #[instrument(skip(self, caller))]
    pub async fn delete(&self, caller: Option<&User>, slug: &str) -> ServiceResult<()> {
        Self::authorize_write(caller)?;
        self.ctx.category_repo().delete(slug).await?;
        info!(slug = %slug, "Category deleted");
        Ok(())
    }
}
