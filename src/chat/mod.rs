//! Customer Chat
//!
//! - **types**: `Contact`, `Message`, `Sender`
//! - **session**: `ChatSession` holding contacts, transcripts and selection
//! - **responder**: `AutoResponder` posting cancellable simulated replies
//! - **fixtures**: Mock contacts and conversations
//! - **error**: Error types

pub mod error;
pub mod fixtures;
pub mod responder;
pub mod session;
pub mod types;

pub use error::{ChatError, ChatResult};
pub use responder::{AutoResponder, ReplyHandle, SharedSession, DEFAULT_REPLY_TEXT};
pub use session::ChatSession;
pub use types::{initials, Contact, Message, Sender};
