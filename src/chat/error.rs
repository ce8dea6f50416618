//! Chat error types

use thiserror::Error;

/// Errors that can occur in a chat session
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChatError {
    /// Referenced contact does not exist
    #[error("Unknown contact: {0}")]
    UnknownContact(String),

    /// Message text was blank
    #[error("Message text is empty")]
    EmptyMessage,
}

/// Result type for chat operations
pub type ChatResult<T> = Result<T, ChatError>;
