//! User entity - a registered account

use chrono::{DateTime, Utc};

use super::Role;

/// User account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub role: Role,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Role used for authorization
    ///
    /// Superusers always act as admins whatever role is stored.
    pub fn effective_role(&self) -> Role {
        if self.is_superuser {
            Role::Admin
        } else {
            self.role
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.effective_role() == Role::Admin
    }

    #[inline]
    pub fn is_moderator(&self) -> bool {
        self.role == Role::Moderator
    }

    /// Check whether this account was registered with exactly this pair
    pub fn matches_identity(&self, username: &str, email: &str) -> bool {
        self.username == username && self.email == email
    }
}

/// Data needed to create a user
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub role: Role,
    pub is_superuser: bool,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// A superuser account, stored with the admin role
    pub fn superuser(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            role: Role::Admin,
            is_superuser: true,
            ..Self::new(username, email)
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_user(id: i64, role: Role) -> User {
    User {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        first_name: String::new(),
        last_name: String::new(),
        bio: None,
        role,
        is_superuser: false,
        last_login: None,
        date_joined: Utc::now(),
    }
}
