//! Template store error types

use thiserror::Error;

/// Errors that can occur while managing stored templates
#[derive(Error, Debug)]
pub enum TemplateError {
    /// A required form field was blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Requested template does not exist
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;
