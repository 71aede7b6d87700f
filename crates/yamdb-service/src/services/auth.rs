//! Authentication service
//!
//! Handles signup with emailed confirmation codes, the exchange of a code
//! for an access token, and resolution of presented tokens.

use chrono::Utc;
use tracing::{info, instrument, warn};
use validator::Validate;
use yamdb_common::{AppError, EmailMessage};
use yamdb_core::entities::{NewUser, User};
use yamdb_core::DomainError;

use crate::dto::{SignupRequest, SignupResponse, TokenRequest, TokenResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const CONFIRMATION_SUBJECT: &str = "YaMDb confirmation code";

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register an account (or find the identical one) and mail it a code
    ///
    /// Repeating a signup with the same username and email is allowed and
    /// sends a fresh code; earlier codes stay valid.
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<SignupResponse> {
        request.validate()?;

        let existing = self
            .ctx
            .user_repo()
            .find_by_username_or_email(&request.username, &request.email)
            .await?;

        let user = match existing.as_slice() {
            [] => {
                let user = self
                    .ctx
                    .user_repo()
                    .create(&NewUser::new(&request.username, &request.email))
                    .await?;
                info!(user_id = %user.id, "User signed up");
                user
            }
            [user] if user.matches_identity(&request.username, &request.email) => user.clone(),
            _ => {
                return Err(DomainError::SignupConflict {
                    username: request.username,
                    email: request.email,
                }
                .into());
            }
        };

        self.send_code(&user).await?;

        Ok(SignupResponse {
            email: user.email,
            username: user.username,
        })
    }

    /// Exchange a confirmation code for an access token
    ///
    /// A successful exchange records the login, which retires every code
    /// issued before it.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn obtain_token(&self, request: TokenRequest) -> ServiceResult<TokenResponse> {
        request.validate()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", &request.username))?;

        if !self
            .ctx
            .confirmation_codes()
            .check_code(&user, &request.confirmation_code)
        {
            warn!(user_id = %user.id, "Rejected confirmation code");
            return Err(DomainError::InvalidConfirmationCode.into());
        }

        self.ctx
            .user_repo()
            .touch_last_login(user.id, Utc::now())
            .await?;

        let token = self.ctx.jwt_service().issue_access_token(user.id)?;
        info!(user_id = %user.id, "Access token issued");

        Ok(TokenResponse { token })
    }

    /// Resolve a bearer token to the account it was issued for
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        let user_id = claims.user_id()?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))
    }

    async fn send_code(&self, user: &User) -> ServiceResult<()> {
        let code = self.ctx.confirmation_codes().make_code(user)?;
        let message = EmailMessage::new(
            &user.email,
            CONFIRMATION_SUBJECT,
            format!("Your confirmation code: {code}"),
        );
        self.ctx.mailer().send(&message).await?;
        info!(user_id = %user.id, "Confirmation code sent");
        Ok(())
    }
}
