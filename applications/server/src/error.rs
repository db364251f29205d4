/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use headliner_core::{HeadlinerError, RosterId, SeasonDate};
use headliner_storage::StorageError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient budget: {0}")]
    InsufficientBudget(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Scoring incomplete after advancing to {date}")]
    ScoringIncomplete {
        date: SeasonDate,
        rosters: Vec<RosterId>,
    },

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<HeadlinerError> for ServerError {
    fn from(err: HeadlinerError) -> Self {
        let message = err.to_string();
        match err {
            HeadlinerError::InvalidName { .. } | HeadlinerError::InvalidInput(_) => {
                ServerError::BadRequest(message)
            }
            HeadlinerError::NotFound { .. } => ServerError::NotFound(message),
            HeadlinerError::AlreadyMember { .. } | HeadlinerError::DuplicateAssignment { .. } => {
                ServerError::Conflict(message)
            }
            HeadlinerError::OwnerCannotLeave => ServerError::Forbidden(message),
            HeadlinerError::InsufficientBudget { .. } => ServerError::InsufficientBudget(message),
            HeadlinerError::CatalogUnavailable(_) => ServerError::Unavailable(message),
            HeadlinerError::ScoringIncomplete { date, rosters } => {
                ServerError::ScoringIncomplete { date, rosters }
            }
            HeadlinerError::Unimplemented(_) => ServerError::NotImplemented(message),
            HeadlinerError::Snapshot(_) => ServerError::Internal(message),
        }
    }
}

impl From<StorageError> for ServerError {
    fn from(err: StorageError) -> Self {
        let message = err.to_string();
        match err {
            StorageError::NotFound { .. } => ServerError::NotFound(message),
            StorageError::UsernameTaken(_) => ServerError::Conflict(message),
            StorageError::InvalidData(_) => ServerError::BadRequest(message),
            _ => ServerError::Database(message),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ServerError::InsufficientBudget(msg) => (StatusCode::PAYMENT_REQUIRED, msg),
            ServerError::NotImplemented(msg) => (StatusCode::NOT_IMPLEMENTED, msg),
            ServerError::Unavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            }
            ServerError::ScoringIncomplete { date, rosters } => {
                tracing::warn!(%date, incomplete = rosters.len(), "Advance left rosters unscored");
                let body = Json(json!({
                    "error": format!("Scoring incomplete after advancing to {date}"),
                    "month": date.month(),
                    "year": date.year(),
                    "month_name": date.month_name(),
                    "incompleteRosters": rosters,
                }));
                return (StatusCode::SERVICE_UNAVAILABLE, body).into_response();
            }
            ServerError::Database(ref msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
