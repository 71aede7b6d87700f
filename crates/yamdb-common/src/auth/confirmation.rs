//! Signup confirmation codes
//!
//! A code has the form `<issued-at, base36>-<truncated HMAC-SHA256, hex>`.
//! The digest covers the account ID, username, email and last login time,
//! so a code stops verifying once the account logs in or changes identity.
//! Nothing is stored server side.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use yamdb_core::User;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Bytes of the digest kept in the code
const DIGEST_BYTES: usize = 10;

const KEY_SALT: &[u8] = b"yamdb.confirmation-code";

/// Issues and checks confirmation codes
#[derive(Clone)]
pub struct ConfirmationCodes {
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl ConfirmationCodes {
    #[must_use]
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let mut key = KEY_SALT.to_vec();
        key.extend_from_slice(secret.as_bytes());
        Self {
            secret: key,
            ttl_secs,
        }
    }

    /// Issue a code for the account's current state
    ///
    /// # Errors
    /// Returns an error if the HMAC cannot be keyed
    pub fn make_code(&self, user: &User) -> Result<String, AppError> {
        self.make_code_at(user, Utc::now())
    }

    /// Check a code against the account's current state
    #[must_use]
    pub fn check_code(&self, user: &User, code: &str) -> bool {
        self.check_code_at(user, code, Utc::now())
    }

    pub(crate) fn make_code_at(
        &self,
        user: &User,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let ts = issued_at.timestamp();
        let digest = self.mac(user, ts)?.finalize().into_bytes();
        Ok(format!("{}-{}", to_base36(ts), hex::encode(&digest[..DIGEST_BYTES])))
    }

    pub(crate) fn check_code_at(&self, user: &User, code: &str, now: DateTime<Utc>) -> bool {
        let Some((ts_part, digest_part)) = code.split_once('-') else {
            return false;
        };
        let Some(ts) = from_base36(ts_part) else {
            return false;
        };
        if now.timestamp() - ts > self.ttl_secs {
            return false;
        }
        let Ok(provided) = hex::decode(digest_part) else {
            return false;
        };
        if provided.len() != DIGEST_BYTES {
            return false;
        }
        self.mac(user, ts)
            .is_ok_and(|mac| mac.verify_truncated_left(&provided).is_ok())
    }

    fn mac(&self, user: &User, ts: i64) -> Result<HmacSha256, AppError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC key rejected: {e}")))?;
        let last_login = user
            .last_login
            .map(|t| t.timestamp_micros().to_string())
            .unwrap_or_default();
        let message = format!(
            "{}|{}|{}|{}|{}",
            user.id, user.username, user.email, last_login, ts
        );
        mac.update(message.as_bytes());
        Ok(mac)
    }
}

impl std::fmt::Debug for ConfirmationCodes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationCodes")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

fn to_base36(mut n: i64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n <= 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn from_base36(s: &str) -> Option<i64> {
    if s.is_empty() || s.len() > 13 {
        return None;
    }
    i64::from_str_radix(s, 36).ok()
}
