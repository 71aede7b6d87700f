//! In-memory outbox, used by tests

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{EmailMessage, Mailer};
use crate::error::AppError;

/// Keeps every sent message for later inspection
#[derive(Debug, Default)]
pub struct MemoryMailer {
    outbox: Mutex<Vec<EmailMessage>>,
    fail: Mutex<bool>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.outbox.lock().clone()
    }

    /// Most recent message addressed to `to`
    pub fn last_to(&self, to: &str) -> Option<EmailMessage> {
        self.outbox.lock().iter().rev().find(|m| m.to == to).cloned()
    }

    /// Make every following send fail
    pub fn fail_deliveries(&self, fail: bool) {
        *self.fail.lock() = fail;
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        if *self.fail.lock() {
            return Err(AppError::Mail("delivery disabled".to_string()));
        }
        self.outbox.lock().push(message.clone());
        Ok(())
    }
}
