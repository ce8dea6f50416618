//! Chat Session
//!
//! In-memory contact list and per-contact transcripts, with one contact
//! selected at a time. Messages to the selected contact count as read.

use crate::chat::error::{ChatError, ChatResult};
use crate::chat::fixtures;
use crate::chat::types::{Contact, Message, Sender};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Contacts, transcripts and the current selection
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    contacts: Vec<Contact>,
    transcripts: HashMap<String, Vec<Message>>,
    selected: Option<String>,
}

impl ChatSession {
    /// Create a session over `contacts` with empty transcripts
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            transcripts: HashMap::new(),
            selected: None,
        }
    }

    /// Session seeded with the mock contacts, first contact selected
    pub fn with_fixtures(now: DateTime<Utc>) -> Self {
        let contacts = fixtures::mock_contacts(now);
        let selected = contacts.first().map(|c| c.id.clone());
        Self {
            contacts,
            transcripts: fixtures::mock_transcripts(now),
            selected,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn contact(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    fn contact_mut(&mut self, id: &str) -> ChatResult<&mut Contact> {
        self.contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ChatError::UnknownContact(id.to_string()))
    }

    /// Contacts whose name contains `query`, ignoring case
    ///
    /// The query is matched as given, surrounding whitespace included.
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        let needle = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn selected(&self) -> Option<&Contact> {
        self.selected.as_deref().and_then(|id| self.contact(id))
    }

    /// Select a contact and mark its conversation as read
    pub fn select(&mut self, id: &str) -> ChatResult<&Contact> {
        let contact = self.contact_mut(id)?;
        contact.unread = 0;
        self.selected = Some(id.to_string());
        self.contact(id)
            .ok_or_else(|| ChatError::UnknownContact(id.to_string()))
    }

    /// Transcript for a contact, oldest first
    pub fn messages(&self, id: &str) -> ChatResult<&[Message]> {
        if self.contact(id).is_none() {
            return Err(ChatError::UnknownContact(id.to_string()));
        }
        Ok(self
            .transcripts
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    /// Send a message from the dashboard user to a contact
    pub fn send(&mut self, id: &str, text: &str) -> ChatResult<Message> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        self.append(id, Message::new(text, Sender::User, Utc::now()))
    }

    /// Record a message from the customer
    pub fn receive(&mut self, id: &str, text: &str) -> ChatResult<Message> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        self.append(id, Message::new(text, Sender::Customer, Utc::now()))
    }

    fn append(&mut self, id: &str, message: Message) -> ChatResult<Message> {
        let is_selected = self.selected.as_deref() == Some(id);
        let contact = self.contact_mut(id)?;

        contact.last_message = message.text.clone();
        contact.last_activity = message.timestamp;
        if message.sender == Sender::Customer && !is_selected {
            contact.unread += 1;
        }

        self.transcripts
            .entry(id.to_string())
            .or_default()
            .push(message.clone());

        tracing::debug!(
            contact_id = %id,
            sender = ?message.sender,
            "Appended chat message"
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ChatSession {
        ChatSession::with_fixtures(Utc::now())
    }

    #[test]
    fn test_fixtures() {
        let session = session();
        assert_eq!(session.contacts().len(), 5);
        assert_eq!(session.selected().unwrap().name, "John Doe");
        assert_eq!(session.messages("1").unwrap().len(), 5);
        assert!(session.messages("4").unwrap().is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let session = session();
        let names: Vec<&str> = session
            .search("JO")
            .into_iter()
            .map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["John Doe", "Mike Johnson"]);

        assert_eq!(session.search("").len(), 5);
        assert!(session.search("zelda").is_empty());
    }

    #[test]
    fn test_search_keeps_whitespace() {
        let session = session();
        let names: Vec<&str> = session
            .search("john ")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["John Doe"]);

        let names: Vec<&str> = session
            .search(" doe")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["John Doe"]);
    }

    #[test]
    fn test_select_clears_unread() {
        let mut session = session();
        assert_eq!(session.contact("3").unwrap().unread, 1);

        let contact = session.select("3").unwrap();
        assert_eq!(contact.unread, 0);
        assert_eq!(session.selected().unwrap().id, "3");

        assert_eq!(
            session.select("99").unwrap_err(),
            ChatError::UnknownContact("99".to_string())
        );
    }

    #[test]
    fn test_send_appends_and_updates_preview() {
        let mut session = session();
        let message = session.send("2", "It ships today").unwrap();

        assert_eq!(message.sender, Sender::User);
        let transcript = session.messages("2").unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.last().unwrap().text, "It ships today");
        assert_eq!(session.contact("2").unwrap().last_message, "It ships today");
    }

    #[test]
    fn test_send_rejects_blank() {
        let mut session = session();
        assert_eq!(session.send("1", "   ").unwrap_err(), ChatError::EmptyMessage);
        assert_eq!(session.messages("1").unwrap().len(), 5);
    }

    #[test]
    fn test_send_to_unknown_contact() {
        let mut session = session();
        assert!(matches!(
            session.send("nope", "hi"),
            Err(ChatError::UnknownContact(_))
        ));
        assert!(session.messages("nope").is_err());
    }

    #[test]
    fn test_receive_counts_unread_for_background_contacts() {
        let mut session = session();
        session.select("1").unwrap();

        session.receive("1", "Thanks!").unwrap();
        assert_eq!(session.contact("1").unwrap().unread, 0);

        session.receive("5", "Hello?").unwrap();
        session.receive("5", "Anyone?").unwrap();
        assert_eq!(session.contact("5").unwrap().unread, 2);
        assert_eq!(session.messages("5").unwrap().len(), 2);
    }
}
