/// Storage-specific errors
use headliner_core::HeadlinerError;
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Username already registered
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Row or input failed validation before hitting the database
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Snapshot serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create an invalid data error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Migration(err.to_string())
    }
}

impl From<HeadlinerError> for StorageError {
    fn from(err: HeadlinerError) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Storage failures seen by the engine
///
/// Anything that is not a plain miss or bad input means the backing
/// database could not answer, which the engine treats as an outage.
impl From<StorageError> for HeadlinerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => HeadlinerError::NotFound { entity, id },
            StorageError::UsernameTaken(_) | StorageError::InvalidData(_) => {
                HeadlinerError::invalid_input(err.to_string())
            }
            StorageError::SerializationError(msg) => HeadlinerError::Snapshot(msg),
            other => HeadlinerError::catalog_unavailable(other.to_string()),
        }
    }
}
