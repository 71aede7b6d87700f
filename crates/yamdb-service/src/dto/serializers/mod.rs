//! Per-action serializer selection
//!
//! Validation of write bodies and the choice of response shape depend on
//! what is being done. Titles and reviews dispatch on an explicit action
//! enum; user updates depend on the caller's role.

pub mod review;
pub mod title;

use yamdb_core::entities::{Role, User};

use super::requests::UpdateUserRequest;

pub use review::{ReviewAction, ReviewFields, ReviewSerializer};
pub use title::{TitleAction, TitleSerializer};

/// Account changes a caller is allowed to make
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<Role>,
}

impl UserUpdate {
    /// `role` is read-only unless the caller is an admin; it is dropped
    /// without an error otherwise
    pub fn from_request(request: UpdateUserRequest, caller: Role) -> Self {
        Self {
            username: request.username,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            bio: request.bio,
            role: if caller == Role::Admin { request.role } else { None },
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the changes onto `user`, returning whether anything changed
    pub fn apply(self, user: &mut User) -> bool {
        let mut changed = false;

        if let Some(username) = self.username.filter(|v| *v != user.username) {
            user.username = username;
            changed = true;
        }
        if let Some(email) = self.email.filter(|v| *v != user.email) {
            user.email = email;
            changed = true;
        }
        if let Some(first_name) = self.first_name.filter(|v| *v != user.first_name) {
            user.first_name = first_name;
            changed = true;
        }
        if let Some(last_name) = self.last_name.filter(|v| *v != user.last_name) {
            user.last_name = last_name;
            changed = true;
        }
        if let Some(bio) = self.bio.filter(|v| user.bio.as_ref() != Some(v)) {
            user.bio = Some(bio);
            changed = true;
        }
        if let Some(role) = self.role.filter(|v| *v != user.role) {
            user.role = role;
            changed = true;
        }

        changed
    }
}
