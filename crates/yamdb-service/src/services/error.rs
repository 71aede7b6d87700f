//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use yamdb_common::AppError;
use yamdb_core::{DomainError, Verdict};

/// Service layer error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Application error (auth, mail, etc.)
    #[error(transparent)]
    App(#[from] AppError),

    /// Resource not found
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Caller is known but may not perform the action
    #[error("You do not have permission to {action}")]
    PermissionDenied { action: String },

    /// No credentials were presented for an action that needs them
    #[error("Authentication credentials were not provided")]
    Unauthenticated,

    /// Request body failed field validation
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    /// Request body rejected, optionally tied to one field
    #[error("{message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(action: impl Into<String>) -> Self {
        Self::PermissionDenied {
            action: action.into(),
        }
    }

    /// Create a validation error not tied to a field
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: msg.into(),
        }
    }

    /// Create a validation error for one request field
    pub fn field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field.into()),
            message: msg.into(),
        }
    }

    /// A required field was absent from a full write
    pub fn required(field: &str) -> Self {
        Self::field(field, "This field is required.")
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Turn a permission verdict into a result
    pub fn check(verdict: Verdict, action: &str) -> ServiceResult<()> {
        match verdict {
            Verdict::Allow => Ok(()),
            Verdict::Unauthenticated => Err(Self::Unauthenticated),
            Verdict::Forbidden => Err(Self::permission_denied(action)),
        }
    }

    /// Request field the error refers to, if any
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::Domain(e) => e.field(),
            Self::Validation { field, .. } => field.as_deref(),
            Self::InvalidRequest(errors) => errors.errors().keys().next().map(AsRef::as_ref),
            _ => None,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_authorization() {
                    403
                } else if e.is_validation() || e.is_conflict() {
                    400
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::PermissionDenied { .. } => 403,
            Self::Unauthenticated => 401,
            Self::InvalidRequest(_) | Self::Validation { .. } => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::Unauthenticated => "NOT_AUTHENTICATED",
            Self::InvalidRequest(_) | Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::PermissionDenied { .. } => AppError::InsufficientPermissions,
            ServiceError::Unauthenticated => AppError::MissingAuth,
            ServiceError::InvalidRequest(errors) => AppError::Validation(errors.to_string()),
            ServiceError::Validation { message, .. } => AppError::Validation(message),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
