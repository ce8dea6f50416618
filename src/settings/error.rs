//! Settings error types

use thiserror::Error;

/// Errors that can occur while managing API settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// One or more required credential fields were blank
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Credentials are locked while a connection is active
    #[error("Already connected; disconnect before changing credentials")]
    AlreadyConnected,

    /// The connection probe rejected the credentials
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The connection test was cancelled before completing
    #[error("Connection test cancelled")]
    Cancelled,

    /// Unknown notification preference name
    #[error("Unknown notification kind: {0}")]
    UnknownNotification(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;
