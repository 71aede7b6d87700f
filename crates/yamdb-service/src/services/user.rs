//! User service
//!
//! Account administration for admins plus the caller's own profile.

use tracing::{info, instrument};
use validator::Validate;
use yamdb_core::entities::{NewUser, User};
use yamdb_core::permissions::admin_only;
use yamdb_core::traits::{Page, PageRequest};
use yamdb_core::Actor;

use crate::dto::serializers::UserUpdate;
use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn require_admin(caller: &User) -> ServiceResult<()> {
        ServiceError::check(admin_only(Some(&Actor::from(caller))), "manage users")
    }

    async fn find(&self, username: &str) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", username))
    }

    /// List accounts, optionally by username substring
    #[instrument(skip(self, caller), fields(caller_id = %caller.id))]
    pub async fn list(
        &self,
        caller: &User,
        search: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Page<UserResponse>> {
        Self::require_admin(caller)?;
        let users = self.ctx.user_repo().list(search, page).await?;
        Ok(users.map(UserResponse::from))
    }

    /// Create an account on someone's behalf
    #[instrument(skip(self, caller, request), fields(caller_id = %caller.id))]
    pub async fn create(
        &self,
        caller: &User,
        request: CreateUserRequest,
    ) -> ServiceResult<UserResponse> {
        Self::require_admin(caller)?;
        request.validate()?;

        let new_user = NewUser {
            first_name: request.first_name.unwrap_or_default(),
            last_name: request.last_name.unwrap_or_default(),
            bio: request.bio,
            role: request.role.unwrap_or_default(),
            ..NewUser::new(request.username, request.email)
        };
        let user = self.ctx.user_repo().create(&new_user).await?;
        info!(user_id = %user.id, role = %user.role, "User created by admin");

        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self, caller), fields(caller_id = %caller.id))]
    pub async fn get(&self, caller: &User, username: &str) -> ServiceResult<UserResponse> {
        Self::require_admin(caller)?;
        Ok(UserResponse::from(self.find(username).await?))
    }

    /// Partially update any account, role included
    #[instrument(skip(self, caller, request), fields(caller_id = %caller.id))]
    pub async fn update(
        &self,
        caller: &User,
        username: &str,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        Self::require_admin(caller)?;
        request.validate()?;

        let user = self.find(username).await?;
        self.apply(user, UserUpdate::from_request(request, caller.effective_role()))
            .await
    }

    #[instrument(skip(self, caller), fields(caller_id = %caller.id))]
    pub async fn delete(&self, caller: &User, username: &str) -> ServiceResult<()> {
        Self::require_admin(caller)?;
        self.ctx.user_repo().delete(username).await?;
        info!(username = %username, "User deleted");
        Ok(())
    }

    /// The caller's own profile
    pub fn me(&self, caller: &User) -> UserResponse {
        UserResponse::from(caller)
    }

    /// Partially update the caller's own profile
    ///
    /// Only admins may change their role here; for everyone else the field
    /// is ignored.
    #[instrument(skip(self, caller, request), fields(user_id = %caller.id))]
    pub async fn update_me(
        &self,
        caller: &User,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        request.validate()?;

        let update = UserUpdate::from_request(request, caller.effective_role());
        self.apply(caller.clone(), update).await
    }

    async fn apply(&self, mut user: User, update: UserUpdate) -> ServiceResult<UserResponse> {
        if update.apply(&mut user) {
            self.ctx.user_repo().update(&user).await?;
            info!(user_id = %user.id, "User profile updated");
        }
        Ok(UserResponse::from(user))
    }
}
