//! Unified error model for account mutations.
//! Validation failures are caller mistakes and carry the offending body field;
//! internal failures wrap a host-side cause. Store errors pass through unchanged.

use thiserror::Error;

/// Reason attached to a missing mandatory body field.
pub const REQUIRED: &str = "Required";

#[derive(Debug, Error)]
pub enum AppError {
    /// The opaque `extra` payload could not be decoded.
    #[error("invalid request body: {0}")]
    BadRequest(#[source] serde_json::Error),

    /// A specific body field failed validation.
    #[error("{field} in body: {reason}")]
    InvalidBody { field: String, reason: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// Host-side fault (hashing, re-encoding); never the caller's mistake.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_body<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        AppError::InvalidBody { field: field.into(), reason: reason.into() }
    }

    pub fn required<F: Into<String>>(field: F) -> Self { Self::invalid_body(field, REQUIRED) }
    pub fn not_found<S: Into<String>>(msg: S) -> Self { AppError::NotFound(msg.into()) }
    pub fn conflict<S: Into<String>>(msg: S) -> Self { AppError::Conflict(msg.into()) }

    pub fn internal<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AppError::Internal(anyhow::Error::new(err))
    }

    /// Stable machine-readable code.
    pub fn code_str(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::InvalidBody { .. } => "invalid_body",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::Internal(_) => "internal",
        }
    }

    /// Map to HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::BadRequest(_) | AppError::InvalidBody { .. } => 400,
            AppError::NotFound(_) => 404,
            AppError::Conflict(_) => 409,
            AppError::Internal(_) => 500,
        }
    }

    /// Body field path for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::InvalidBody { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
