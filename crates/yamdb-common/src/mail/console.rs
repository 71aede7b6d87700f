//! Mailer that writes messages to the log

use async_trait::async_trait;
use tracing::info;

use super::{EmailMessage, Mailer};
use crate::error::AppError;

/// Development mailer; nothing leaves the process
#[derive(Debug, Clone)]
pub struct ConsoleMailer {
    from: String,
}

impl ConsoleMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "Email sent to console"
        );
        Ok(())
    }
}
