//! Chat data types
//!
//! - `Contact`: a customer with a conversation preview
//! - `Message`: one entry in a conversation transcript
//! - `Sender`: who wrote a message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The business operator using the dashboard
    User,
    /// The customer on the other end
    Customer,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(text: impl Into<String>, sender: Sender, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp,
        }
    }

    /// Builder: override the generated ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Clock time as shown next to a chat bubble, e.g. `"02:05 PM"`
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%I:%M %p").to_string()
    }
}

/// A customer contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    /// Text of the most recent message
    pub last_message: String,
    /// When the most recent message was exchanged
    pub last_activity: DateTime<Utc>,
    /// Customer messages not yet seen
    pub unread: u32,
    /// Short label shown in place of a picture
    pub avatar: String,
}

impl Contact {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        last_message: impl Into<String>,
        last_activity: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        let avatar = initials(&name);
        Self {
            id: id.into(),
            name,
            last_message: last_message.into(),
            last_activity,
            unread: 0,
            avatar,
        }
    }

    /// Builder: set unread count
    pub fn unread(mut self, count: u32) -> Self {
        self.unread = count;
        self
    }

    /// Age of the last activity, e.g. `"15m ago"`
    pub fn relative_time(&self, now: DateTime<Utc>) -> String {
        let seconds = (now - self.last_activity).num_seconds().max(0);
        if seconds < 60 {
            "just now".to_string()
        } else if seconds < 3600 {
            format!("{}m ago", seconds / 60)
        } else if seconds < 86400 {
            format!("{}h ago", seconds / 3600)
        } else {
            format!("{}d ago", seconds / 86400)
        }
    }
}

/// Upper-case initials of the first two words of `name`
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_initials() {
        assert_eq!(initials("John Doe"), "JD");
        assert_eq!(initials("sarah jane williams"), "SJ");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn test_relative_time() {
        let now = Utc::now();
        let contact = |ago: Duration| Contact::new("1", "A B", "hi", now - ago);

        assert_eq!(contact(Duration::seconds(5)).relative_time(now), "just now");
        assert_eq!(contact(Duration::minutes(2)).relative_time(now), "2m ago");
        assert_eq!(contact(Duration::minutes(90)).relative_time(now), "1h ago");
        assert_eq!(contact(Duration::days(3)).relative_time(now), "3d ago");
        assert_eq!(contact(Duration::minutes(-5)).relative_time(now), "just now");
    }

    #[test]
    fn test_message_formatting() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 14, 5, 0).unwrap();
        let message = Message::new("hello", Sender::User, ts).with_id("42");
        assert_eq!(message.id, "42");
        assert_eq!(message.formatted_time(), "02:05 PM");

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["sender"], "user");
    }
}
