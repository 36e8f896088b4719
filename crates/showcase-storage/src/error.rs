use thiserror::Error;

/// Errors raised by record-store backends.
///
/// Missing records are *not* errors: reads return `Option` and deletes
/// return a removed flag. These variants cover genuine failures only.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A record with the same identifier already exists.
    #[error("Record already exists: {id}")]
    AlreadyExists { id: String },

    /// The record payload is malformed or violates a store constraint.
    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    /// The backend could not complete the operation.
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },
}

impl StorageError {
    /// Creates a new `AlreadyExists` error.
    #[must_use]
    pub fn already_exists(id: impl Into<String>) -> Self {
        Self::AlreadyExists { id: id.into() }
    }

    /// Creates a new `InvalidRecord` error.
    #[must_use]
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Creates a new `Unavailable` error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
