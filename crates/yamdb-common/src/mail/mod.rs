//! Outgoing mail
//!
//! Delivery is awaited by the caller and failures are returned, never
//! swallowed.

mod console;
mod memory;
mod smtp;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{MailBackend, MailConfig};
use crate::error::AppError;

pub use console::ConsoleMailer;
pub use memory::MemoryMailer;
pub use smtp::SmtpMailer;

/// A plain-text message to a single recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError>;
}

/// Build the mailer selected by configuration
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, AppError> {
    match config.backend {
        MailBackend::Console => Ok(Arc::new(ConsoleMailer::new(config.from_email.clone()))),
        MailBackend::Smtp => Ok(Arc::new(SmtpMailer::from_config(config)?)),
    }
}
