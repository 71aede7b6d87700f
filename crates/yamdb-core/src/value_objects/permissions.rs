//! Access predicates evaluated per request
//!
//! Every predicate is a pure function of the acting user (if any), the kind of
//! access requested and, for object-level checks, the owner of the object.

use crate::entities::{Role, User};

/// Whether a request only reads or also mutates state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// List and retrieve
    Read,
    /// Create, update and delete
    Write,
}

impl Access {
    #[inline]
    pub fn is_safe(self) -> bool {
        self == Self::Read
    }
}

/// Authenticated caller as seen by the predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    /// Effective role (superusers are admins)
    pub role: Role,
}

impl Actor {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    #[inline]
    pub fn is_moderator(&self) -> bool {
        self.role == Role::Moderator
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.effective_role())
    }
}

/// Outcome of a permission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    /// No credentials were presented
    Unauthenticated,
    /// Credentials were presented but do not grant access
    Forbidden,
}

impl Verdict {
    #[inline]
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Any authenticated caller
pub fn authenticated(actor: Option<&Actor>) -> Verdict {
    match actor {
        Some(_) => Verdict::Allow,
        None => Verdict::Unauthenticated,
    }
}

/// Admins only, for every method
pub fn admin_only(actor: Option<&Actor>) -> Verdict {
    match actor {
        None => Verdict::Unauthenticated,
        Some(a) if a.is_admin() => Verdict::Allow,
        Some(_) => Verdict::Forbidden,
    }
}

/// Reads for everyone, writes for admins (categories, genres, titles)
pub fn admin_or_read_only(actor: Option<&Actor>, access: Access) -> Verdict {
    if access.is_safe() {
        return Verdict::Allow;
    }
    admin_only(actor)
}

/// Reads for everyone, writes for any authenticated caller
pub fn authenticated_or_read_only(actor: Option<&Actor>, access: Access) -> Verdict {
    if access.is_safe() {
        return Verdict::Allow;
    }
    authenticated(actor)
}

/// Object-level check for reviews and comments
///
/// Mutation is limited to the author, moderators and admins.
pub fn author_or_staff(actor: Option<&Actor>, access: Access, author_id: i64) -> Verdict {
    if access.is_safe() {
        return Verdict::Allow;
    }
    match actor {
        None => Verdict::Unauthenticated,
        Some(a) if a.id == author_id || a.is_admin() || a.is_moderator() => Verdict::Allow,
        Some(_) => Verdict::Forbidden,
    }
}
