//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and provisioning accounts.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{extract::Request, ServiceExt};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use yamdb_api::{create_app, create_app_state_with_mailer, AppState};
use yamdb_common::{AppConfig, MemoryMailer};
use yamdb_core::entities::{NewUser, Role};

use crate::fixtures::{unique_suffix, SignupRequest, TokenRequest, TokenResponse};

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Prefix of the confirmation mail body
const CODE_PREFIX: &str = "Your confirmation code: ";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub mailer: Arc<MemoryMailer>,
    pub state: AppState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        // Outgoing mail is captured instead of sent
        let mailer = Arc::new(MemoryMailer::new());
        let state = create_app_state_with_mailer(config, mailer.clone()).await?;

        // Build application
        let app = create_app(state.clone());

        // Bind to port
        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
                .await
                .ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Create HTTP client
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            mailer,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url(), path)
    }

    fn with_token(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    /// GET outside the API prefix (health probes)
    pub async fn get_raw(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let builder = self.client.get(self.url(path));
        Ok(Self::with_token(builder, token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &T,
    ) -> Result<Response> {
        let builder = self.client.post(self.url(path)).json(body);
        Ok(Self::with_token(builder, token).send().await?)
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &T,
    ) -> Result<Response> {
        let builder = self.client.put(self.url(path)).json(body);
        Ok(Self::with_token(builder, token).send().await?)
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &T,
    ) -> Result<Response> {
        let builder = self.client.patch(self.url(path)).json(body);
        Ok(Self::with_token(builder, token).send().await?)
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let builder = self.client.delete(self.url(path));
        Ok(Self::with_token(builder, token).send().await?)
    }

    /// Confirmation code from the last mail sent to `email`
    pub fn last_code(&self, email: &str) -> Result<String> {
        let message = self
            .mailer
            .last_to(email)
            .with_context(|| format!("no mail sent to {email}"))?;
        message
            .body
            .strip_prefix(CODE_PREFIX)
            .map(|code| code.trim().to_string())
            .context("mail body carries no confirmation code")
    }

    /// Walk the signup flow and return an access token
    pub async fn signup_and_login(&self, signup: &SignupRequest) -> Result<String> {
        let response = self.post("/auth/signup", None, signup).await?;
        assert_status(response, StatusCode::OK).await?;

        let request = TokenRequest {
            username: signup.username.clone(),
            confirmation_code: self.last_code(&signup.email)?,
        };
        let response = self.post("/auth/token", None, &request).await?;
        let token: TokenResponse = assert_json(response, StatusCode::OK).await?;
        Ok(token.token)
    }

    /// A fresh account of the given role; returns its username and token
    ///
    /// Elevated roles cannot be self-assigned, so the row is written directly.
    pub async fn user_with_role(&self, role: Role) -> Result<(String, String)> {
        let suffix = unique_suffix();
        let username = format!("{role}{suffix}");
        let ctx = self.state.service_context();

        let user = ctx
            .user_repo()
            .create(&NewUser {
                role,
                ..NewUser::new(username.clone(), format!("{username}@example.com"))
            })
            .await?;
        let token = ctx.jwt_service().issue_access_token(user.id)?;
        Ok((username, token))
    }

    /// A fresh admin account; returns its token
    pub async fn admin_token(&self) -> Result<String> {
        Ok(self.user_with_role(Role::Admin).await?.1)
    }
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    // tests run from the crate directory
    config.database.run_migrations = true;
    config.database.migrations_dir =
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations").to_string();

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("JWT_SECRET").is_err() {
        eprintln!("Skipping test: JWT_SECRET not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
