//! Simulated customer replies
//!
//! After the dashboard user sends a message, an [`AutoResponder`] can post a
//! canned customer reply once a delay has passed. Each reply runs as its own
//! tokio task and can be cancelled individually through its [`ReplyHandle`],
//! or all at once through [`AutoResponder::shutdown`].

use crate::cancel::CancelToken;
use crate::chat::session::ChatSession;
use crate::chat::types::Message;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Chat session shared between request handlers and reply tasks
pub type SharedSession = Arc<RwLock<ChatSession>>;

pub const DEFAULT_REPLY_TEXT: &str = "Thanks for your message! This is a demo response.";

/// Schedules delayed customer replies
#[derive(Debug, Clone)]
pub struct AutoResponder {
    delay: Duration,
    reply_text: String,
    shutdown: CancelToken,
}

impl AutoResponder {
    pub fn new(delay: Duration, reply_text: impl Into<String>) -> Self {
        Self {
            delay,
            reply_text: reply_text.into(),
            shutdown: CancelToken::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Post the reply to `contact_id` once the delay elapses
    ///
    /// The reply goes to the contact given here even if the selection has
    /// since moved elsewhere.
    pub fn schedule(&self, session: SharedSession, contact_id: impl Into<String>) -> ReplyHandle {
        let contact_id = contact_id.into();
        let cancel = CancelToken::new();
        let shutdown = self.shutdown.clone();
        let delay = self.delay;
        let text = self.reply_text.clone();

        let task = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = cancel.cancelled() => return None,
                    _ = shutdown.cancelled() => return None,
                }

                let mut guard = session.write().await;
                // Cancellation may land while another task holds the lock
                if cancel.is_cancelled() || shutdown.is_cancelled() {
                    return None;
                }

                match guard.receive(&contact_id, &text) {
                    Ok(message) => {
                        tracing::debug!(contact_id = %contact_id, "Posted auto-reply");
                        Some(message)
                    }
                    Err(e) => {
                        tracing::warn!(contact_id = %contact_id, error = %e, "Auto-reply dropped");
                        None
                    }
                }
            })
        };

        ReplyHandle { cancel, task }
    }

    /// Cancel every reply scheduled by this responder that has not fired yet
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl Default for AutoResponder {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), DEFAULT_REPLY_TEXT)
    }
}

/// Handle to one scheduled reply
#[derive(Debug)]
pub struct ReplyHandle {
    cancel: CancelToken,
    task: JoinHandle<Option<Message>>,
}

impl ReplyHandle {
    /// Prevent the reply from being posted if it has not fired yet
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task; `None` if it was cancelled or the reply was dropped
    pub async fn join(self) -> Option<Message> {
        match self.task.await {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "Auto-reply task failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::Sender;
    use chrono::Utc;

    fn shared() -> SharedSession {
        Arc::new(RwLock::new(ChatSession::with_fixtures(Utc::now())))
    }

    #[tokio::test]
    async fn test_reply_is_posted() {
        let session = shared();
        let responder = AutoResponder::new(Duration::from_millis(10), "auto");

        let handle = responder.schedule(session.clone(), "2");
        let reply = handle.join().await.unwrap();

        assert_eq!(reply.sender, Sender::Customer);
        assert_eq!(reply.text, "auto");
        let guard = session.read().await;
        assert_eq!(guard.messages("2").unwrap().last().unwrap().text, "auto");
    }

    #[tokio::test]
    async fn test_cancelled_reply_never_appends() {
        let session = shared();
        let responder = AutoResponder::new(Duration::from_secs(60), "auto");

        let handle = responder.schedule(session.clone(), "2");
        handle.cancel();

        assert!(handle.join().await.is_none());
        assert_eq!(session.read().await.messages("2").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_cancels_pending_replies() {
        let session = shared();
        let responder = AutoResponder::new(Duration::from_secs(60), "auto");

        let first = responder.schedule(session.clone(), "1");
        let second = responder.schedule(session.clone(), "3");
        responder.shutdown();

        assert!(first.join().await.is_none());
        assert!(second.join().await.is_none());
        assert_eq!(session.read().await.messages("3").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_while_session_locked() {
        let session = shared();
        let responder = AutoResponder::new(Duration::from_millis(1), "auto");

        let guard = session.write().await;
        let handle = responder.schedule(session.clone(), "2");
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
        drop(guard);

        assert!(handle.join().await.is_none());
        assert_eq!(session.read().await.messages("2").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_while_session_locked() {
        let session = shared();
        let responder = AutoResponder::new(Duration::from_millis(1), "auto");

        let guard = session.write().await;
        let handle = responder.schedule(session.clone(), "2");
        tokio::time::sleep(Duration::from_millis(50)).await;
        responder.shutdown();
        drop(guard);

        assert!(handle.join().await.is_none());
        assert_eq!(session.read().await.messages("2").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reply_to_unknown_contact_is_dropped() {
        let responder = AutoResponder::new(Duration::ZERO, "auto");
        let handle = responder.schedule(shared(), "missing");
        assert!(handle.join().await.is_none());
    }
}
