//! Market Error Types
//!
//! Domain-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Market-specific result type alias
pub type MarketResult<T> = Result<T, MarketError>;

/// Market-specific error variants
#[derive(Debug, Error)]
pub enum MarketError {
    /// Wrong password or unknown email. Deliberately a single variant so
    /// the two cases stay indistinguishable to the caller.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Email already registered
    #[error("Email is already registered")]
    DuplicateEmail,

    /// Nickname already taken (storage constraint)
    #[error("Nickname is already in use")]
    DuplicateNickname,

    /// Item not found
    #[error("Item not found")]
    ItemNotFound,

    /// Session missing, malformed, or expired
    #[error("Login required")]
    SessionInvalid,

    /// Boundary validation failure
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MarketError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Error classification
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketError::InvalidCredentials | MarketError::SessionInvalid => ErrorKind::Unauthorized,
            MarketError::DuplicateEmail | MarketError::DuplicateNickname => ErrorKind::Conflict,
            MarketError::ItemNotFound => ErrorKind::NotFound,
            MarketError::Validation(_) => ErrorKind::BadRequest,
            MarketError::Database(_) | MarketError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            MarketError::Database(e) => {
                tracing::error!(error = %e, "Market database error");
            }
            MarketError::Internal(msg) => {
                tracing::error!(message = %msg, "Market internal error");
            }
            MarketError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Market error");
            }
        }
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<platform::password::PasswordHashError> for MarketError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        MarketError::Internal(err.to_string())
    }
}

/// Whether a sqlx error is a Postgres unique violation, optionally on a
/// specific constraint.
pub fn is_unique_violation(err: &sqlx::Error, constraint: Option<&str>) -> bool {
    let sqlx::Error::Database(db_err) = err else {
        return false;
    };

    if db_err.code().as_deref() != Some("23505") {
        return false;
    }

    match constraint {
        Some(name) => db_err.constraint() == Some(name),
        None => true,
    }
}
