// src/error.rs
use crate::{config::ConfigError, gpa::InvalidGradeError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("database migration error: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("password hashing failed")]
    PasswordHashingError,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session error: {0}")]
    SessionError(String),

    #[error(transparent)]
    InvalidGrade(#[from] InvalidGradeError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("upstream service error: {0}")]
    Upstream(String),

    #[error("service not configured: {0}")]
    NotConfigured(&'static str),

    #[error("unexpected internal error")]
    InternalServerError,

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidGrade(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client. Internal details only go to the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => "Failed to access data.".into(),
            AppError::ConfigError(_) => "Configuration error.".into(),
            AppError::PasswordHashingError => "Failed to process credentials.".into(),
            AppError::InvalidCredentials => "Invalid email or password.".into(),
            AppError::SessionError(_) => "Failed to manage your session.".into(),
            AppError::InvalidGrade(e) => e.to_string(),
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => msg.clone(),
            AppError::Upstream(_) => "Failed to reach upstream service.".into(),
            AppError::NotConfigured(what) => format!("{what} is not configured."),
            AppError::Unauthorized => "Unauthorized".into(),
            AppError::Forbidden => "Forbidden".into(),
            AppError::InternalServerError => "Internal Server Error".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }
        (status, Json(json!({ "message": self.public_message() }))).into_response()
    }
}

/// True when a sqlx error is a UNIQUE constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_variants() {
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidGrade(InvalidGradeError("Q".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotConfigured("AI chat").status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::InternalServerError.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn database_details_stay_private() {
        let err = AppError::SqlxError(sqlx::Error::RowNotFound);
        assert_eq!(err.public_message(), "Failed to access data.");
    }
}
