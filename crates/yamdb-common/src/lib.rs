//! # yamdb-common
//!
//! Shared infrastructure: configuration, error handling, access tokens,
//! confirmation codes, outgoing mail and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod mail;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, ConfirmationCodes, JwtService, TokenType};
pub use config::{
    AppConfig, AppSettings, AuthConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, MailBackend, MailConfig, ServerConfig,
};
pub use error::AppError;
pub use mail::{build_mailer, ConsoleMailer, EmailMessage, Mailer, MemoryMailer, SmtpMailer};
pub use telemetry::{
    try_init_tracing, try_init_tracing_with_config, LogFormat, TracingConfig, TracingError,
};
