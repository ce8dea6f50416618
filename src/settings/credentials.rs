//! Messaging API credentials and notification preferences

use crate::settings::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Business messaging API credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCredentials {
    /// API key (required)
    #[serde(default)]
    pub api_key: String,
    /// Phone number ID (required)
    #[serde(default)]
    pub phone_number_id: String,
    /// Business account ID (optional)
    #[serde(default)]
    pub business_account_id: String,
    /// URL receiving webhook events (optional)
    #[serde(default)]
    pub webhook_url: String,
    /// Access token (required)
    #[serde(default)]
    pub access_token: String,
}

impl ApiCredentials {
    /// Check that every required field is filled in
    pub fn validate(&self) -> SettingsResult<()> {
        let missing: Vec<&'static str> = [
            ("api_key", &self.api_key),
            ("phone_number_id", &self.phone_number_id),
            ("access_token", &self.access_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::MissingFields(missing))
        }
    }

    /// Copy with the secret fields reduced to their last four characters
    pub fn masked(&self) -> Self {
        Self {
            api_key: mask_secret(&self.api_key),
            access_token: mask_secret(&self.access_token),
            ..self.clone()
        }
    }
}

fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// Events the dashboard can notify about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    MessageDelivered,
    MessageRead,
    NewContact,
}

impl FromStr for NotificationKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "message_delivered" | "delivered" => Ok(NotificationKind::MessageDelivered),
            "message_read" | "read" => Ok(NotificationKind::MessageRead),
            "new_contact" | "contact" => Ok(NotificationKind::NewContact),
            _ => Err(SettingsError::UnknownNotification(s.to_string())),
        }
    }
}

/// Per-event notification switches, all off by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    #[serde(default)]
    pub message_delivered: bool,
    #[serde(default)]
    pub message_read: bool,
    #[serde(default)]
    pub new_contact: bool,
}

impl NotificationPreferences {
    pub fn set(&mut self, kind: NotificationKind, enabled: bool) {
        match kind {
            NotificationKind::MessageDelivered => self.message_delivered = enabled,
            NotificationKind::MessageRead => self.message_read = enabled,
            NotificationKind::NewContact => self.new_contact = enabled,
        }
    }

    pub fn is_enabled(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::MessageDelivered => self.message_delivered,
            NotificationKind::MessageRead => self.message_read,
            NotificationKind::NewContact => self.new_contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ApiCredentials {
        ApiCredentials {
            api_key: "key-123456".to_string(),
            phone_number_id: "1550001234".to_string(),
            business_account_id: String::new(),
            webhook_url: String::new(),
            access_token: "EAAG-token-9876".to_string(),
        }
    }

    #[test]
    fn test_validate_complete() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_all_missing() {
        let creds = ApiCredentials {
            phone_number_id: "1550001234".to_string(),
            ..Default::default()
        };

        match creds.validate() {
            Err(SettingsError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["api_key", "access_token"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_masked() {
        let masked = complete().masked();
        assert_eq!(masked.api_key, "****3456");
        assert_eq!(masked.access_token, "****9876");
        assert_eq!(masked.phone_number_id, "1550001234");

        let short = ApiCredentials {
            api_key: "abc".to_string(),
            ..Default::default()
        }
        .masked();
        assert_eq!(short.api_key, "****");
        assert_eq!(short.access_token, "");
    }

    #[test]
    fn test_notification_kind_parse() {
        assert_eq!(
            "message-read".parse::<NotificationKind>().unwrap(),
            NotificationKind::MessageRead
        );
        assert_eq!(
            "NEW_CONTACT".parse::<NotificationKind>().unwrap(),
            NotificationKind::NewContact
        );
        assert!("sms".parse::<NotificationKind>().is_err());
    }

    #[test]
    fn test_preferences_toggle() {
        let mut prefs = NotificationPreferences::default();
        assert!(!prefs.is_enabled(NotificationKind::MessageDelivered));

        prefs.set(NotificationKind::MessageDelivered, true);
        assert!(prefs.is_enabled(NotificationKind::MessageDelivered));
        assert!(!prefs.is_enabled(NotificationKind::NewContact));
    }
}
