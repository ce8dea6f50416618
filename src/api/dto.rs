//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::{Contact, Message};
use crate::settings::{ApiCredentials, ConnectionStatus, NotificationKind, NotificationPreferences};
use crate::template::{RenderContext, Template};

// ============================================
// TEMPLATE DTOs
// ============================================

/// Create template request
#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
}

/// Template list response
#[derive(Debug, Serialize, Deserialize)]
pub struct TemplateListResponse {
    pub templates: Vec<Template>,
    pub total: usize,
}

/// Preview request: values collected from the preview form
#[derive(Debug, Default, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub values: RenderContext,
}

/// Extract variables request
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub message: String,
}

/// Extract variables response
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// All placeholder names in order, duplicates included
    pub variables: Vec<String>,
    /// Placeholder names with duplicates removed
    pub distinct: Vec<String>,
}

/// Ad-hoc render request for a message that is not stored
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub message: String,
    #[serde(default)]
    pub values: RenderContext,
}

/// Render response
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderResponse {
    pub rendered: String,
    pub unresolved: Vec<String>,
}

// ============================================
// SETTINGS DTOs
// ============================================

/// Current settings, secrets masked
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub status: ConnectionStatus,
    pub credentials: Option<ApiCredentials>,
    pub notifications: NotificationPreferences,
}

/// Toggle one notification preference
#[derive(Debug, Deserialize)]
pub struct NotificationUpdateRequest {
    pub kind: NotificationKind,
    pub enabled: bool,
}

// ============================================
// CHAT DTOs
// ============================================

/// Contact search parameters
#[derive(Debug, Default, Deserialize)]
pub struct ContactQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// Contact with its last activity rendered relative to now
#[derive(Debug, Serialize)]
pub struct ContactView {
    #[serde(flatten)]
    pub contact: Contact,
    /// e.g. "2m ago"
    pub last_seen: String,
}

impl ContactView {
    pub fn new(contact: &Contact, now: DateTime<Utc>) -> Self {
        Self {
            last_seen: contact.relative_time(now),
            contact: contact.clone(),
        }
    }
}

/// Contact list response
#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub contacts: Vec<ContactView>,
    pub total: usize,
    pub selected: Option<String>,
}

/// Transcript response
#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub contact_id: String,
    pub messages: Vec<Message>,
}

/// Send message request
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub text: String,
}

/// Send message response
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub message: Message,
    /// Whether a simulated customer reply will follow
    pub auto_reply_scheduled: bool,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded, unhealthy
    pub status: String,
    /// Storage status
    pub storage: String,
    /// Number of stored templates
    pub templates: usize,
    /// Whether the messaging API is connected
    pub api_connected: bool,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Version string
    pub version: String,
}
