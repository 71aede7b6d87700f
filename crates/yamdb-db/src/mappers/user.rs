//! User model -> entity mapper

use yamdb_core::entities::{Role, User};
use yamdb_core::error::DomainError;

use crate::models::UserModel;

/// Roles are constrained by the schema, so a parse failure means a corrupt row
impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role: Role = model.role.parse().map_err(|_| {
            DomainError::DatabaseError(format!(
                "user {} has unknown role {:?}",
                model.id, model.role
            ))
        })?;

        Ok(User {
            id: model.id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            bio: model.bio,
            role,
            is_superuser: model.is_superuser,
            last_login: model.last_login,
            date_joined: model.date_joined,
        })
    }
}
