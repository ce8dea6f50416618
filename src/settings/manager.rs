//! Settings Manager
//!
//! Holds the messaging API credentials, the connection status and the
//! notification preferences, persisted as one JSON document under
//! [`SETTINGS_KEY`].
//!
//! Credentials are locked while connected: saving or testing new ones
//! requires a [`disconnect`](SettingsManager::disconnect) first.

use crate::cancel::CancelToken;
use crate::settings::credentials::{ApiCredentials, NotificationKind, NotificationPreferences};
use crate::settings::error::{SettingsError, SettingsResult};
use crate::storage::{load_json, save_json, KeyValueStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Storage key holding the serialized settings
pub const SETTINGS_KEY: &str = "whatsapp-settings";

/// Verifies credentials against a messaging backend
#[async_trait]
pub trait ConnectionProbe: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Check that `credentials` are accepted
    async fn verify(&self, credentials: &ApiCredentials) -> SettingsResult<()>;
}

/// Probe that waits for a fixed delay and then accepts any credentials
#[derive(Debug, Clone)]
pub struct SimulatedProbe {
    delay: Duration,
}

impl SimulatedProbe {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedProbe {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[async_trait]
impl ConnectionProbe for SimulatedProbe {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn verify(&self, _credentials: &ApiCredentials) -> SettingsResult<()> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Connection state of the messaging API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionStatus {
    Disconnected,
    Connected { since: DateTime<Utc> },
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected { .. })
    }
}

/// Persisted settings document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredSettings {
    #[serde(default)]
    credentials: Option<ApiCredentials>,
    #[serde(default)]
    connected_since: Option<DateTime<Utc>>,
    #[serde(default)]
    notifications: NotificationPreferences,
}

/// Validate `credentials` and run `probe`, giving up when `cancel` fires
pub async fn verify_credentials(
    probe: &dyn ConnectionProbe,
    credentials: &ApiCredentials,
    cancel: &CancelToken,
) -> SettingsResult<()> {
    credentials.validate()?;

    tracing::info!(probe = probe.name(), "Testing API connection");

    tokio::select! {
        result = probe.verify(credentials) => result,
        _ = cancel.cancelled() => {
            tracing::info!(probe = probe.name(), "Connection test cancelled");
            Err(SettingsError::Cancelled)
        }
    }
}

/// Owns API settings and keeps them in sync with a key-value store
pub struct SettingsManager {
    storage: Arc<dyn KeyValueStore>,
    probe: Arc<dyn ConnectionProbe>,
    settings: StoredSettings,
}

impl SettingsManager {
    /// Load settings from `storage`; missing settings start disconnected
    pub fn load(
        storage: Arc<dyn KeyValueStore>,
        probe: Arc<dyn ConnectionProbe>,
    ) -> SettingsResult<Self> {
        let mut settings: StoredSettings =
            load_json(storage.as_ref(), SETTINGS_KEY)?.unwrap_or_default();

        // A connection without credentials cannot be resumed
        if settings.credentials.is_none() {
            settings.connected_since = None;
        }

        Ok(Self {
            storage,
            probe,
            settings,
        })
    }

    fn persist(&self) -> SettingsResult<()> {
        save_json(self.storage.as_ref(), SETTINGS_KEY, &self.settings)?;
        Ok(())
    }

    pub fn status(&self) -> ConnectionStatus {
        match self.settings.connected_since {
            Some(since) => ConnectionStatus::Connected { since },
            None => ConnectionStatus::Disconnected,
        }
    }

    pub fn credentials(&self) -> Option<&ApiCredentials> {
        self.settings.credentials.as_ref()
    }

    pub fn preferences(&self) -> NotificationPreferences {
        self.settings.notifications
    }

    /// Probe used by [`test_connection`](Self::test_connection)
    pub fn probe(&self) -> Arc<dyn ConnectionProbe> {
        Arc::clone(&self.probe)
    }

    /// Store credentials and mark the connection active
    pub fn save(&mut self, credentials: ApiCredentials) -> SettingsResult<ConnectionStatus> {
        if self.status().is_connected() {
            return Err(SettingsError::AlreadyConnected);
        }
        credentials.validate()?;
        self.mark_verified(credentials)
    }

    /// Verify credentials with the probe, then store them as connected
    pub async fn test_connection(
        &mut self,
        credentials: ApiCredentials,
        cancel: &CancelToken,
    ) -> SettingsResult<ConnectionStatus> {
        if self.status().is_connected() {
            return Err(SettingsError::AlreadyConnected);
        }
        verify_credentials(self.probe.as_ref(), &credentials, cancel).await?;
        self.mark_verified(credentials)
    }

    /// Record credentials that were verified elsewhere
    ///
    /// Lets callers run [`verify_credentials`] without holding a lock on the
    /// manager for the duration of the probe.
    pub fn mark_verified(&mut self, credentials: ApiCredentials) -> SettingsResult<ConnectionStatus> {
        if self.status().is_connected() {
            return Err(SettingsError::AlreadyConnected);
        }

        let notifications = self.settings.notifications;
        let previous = std::mem::replace(
            &mut self.settings,
            StoredSettings {
                credentials: Some(credentials),
                connected_since: Some(Utc::now()),
                notifications,
            },
        );

        if let Err(e) = self.persist() {
            self.settings = previous;
            return Err(e);
        }

        tracing::info!("API credentials saved, connection active");
        Ok(self.status())
    }

    /// Clear credentials and drop the connection
    pub fn disconnect(&mut self) -> SettingsResult<()> {
        let previous = self.settings.clone();
        self.settings.credentials = None;
        self.settings.connected_since = None;

        if let Err(e) = self.persist() {
            self.settings = previous;
            return Err(e);
        }

        tracing::info!("API disconnected");
        Ok(())
    }

    /// Enable or disable one notification kind
    pub fn set_notification(
        &mut self,
        kind: NotificationKind,
        enabled: bool,
    ) -> SettingsResult<NotificationPreferences> {
        let previous = self.settings.notifications;
        self.settings.notifications.set(kind, enabled);

        if let Err(e) = self.persist() {
            self.settings.notifications = previous;
            return Err(e);
        }

        tracing::debug!(?kind, enabled, "Updated notification preference");
        Ok(self.settings.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn credentials() -> ApiCredentials {
        ApiCredentials {
            api_key: "key-123456".to_string(),
            phone_number_id: "1550001234".to_string(),
            access_token: "token-9876".to_string(),
            ..Default::default()
        }
    }

    fn manager_with(delay: Duration) -> (SettingsManager, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        let manager =
            SettingsManager::load(storage.clone(), Arc::new(SimulatedProbe::new(delay))).unwrap();
        (manager, storage)
    }

    struct RejectingProbe;

    #[async_trait]
    impl ConnectionProbe for RejectingProbe {
        fn name(&self) -> &str {
            "rejecting"
        }

        async fn verify(&self, _credentials: &ApiCredentials) -> SettingsResult<()> {
            Err(SettingsError::ConnectionFailed("invalid token".to_string()))
        }
    }

    #[test]
    fn test_starts_disconnected() {
        let (manager, _) = manager_with(Duration::ZERO);
        assert_eq!(manager.status(), ConnectionStatus::Disconnected);
        assert!(manager.credentials().is_none());
        assert_eq!(manager.preferences(), NotificationPreferences::default());
    }

    #[test]
    fn test_save_validates() {
        let (mut manager, _) = manager_with(Duration::ZERO);
        let err = manager.save(ApiCredentials::default()).unwrap_err();
        assert!(matches!(err, SettingsError::MissingFields(ref f) if f.len() == 3));
        assert!(!manager.status().is_connected());
    }

    #[test]
    fn test_save_connects_and_persists() {
        let (mut manager, storage) = manager_with(Duration::ZERO);
        let status = manager.save(credentials()).unwrap();
        assert!(status.is_connected());

        let reloaded =
            SettingsManager::load(storage, Arc::new(SimulatedProbe::default())).unwrap();
        assert!(reloaded.status().is_connected());
        assert_eq!(reloaded.credentials(), Some(&credentials()));
    }

    #[test]
    fn test_credentials_locked_while_connected() {
        let (mut manager, _) = manager_with(Duration::ZERO);
        manager.save(credentials()).unwrap();

        let err = manager.save(credentials()).unwrap_err();
        assert!(matches!(err, SettingsError::AlreadyConnected));
    }

    #[test]
    fn test_disconnect_clears_credentials() {
        let (mut manager, storage) = manager_with(Duration::ZERO);
        manager.save(credentials()).unwrap();
        manager
            .set_notification(NotificationKind::MessageRead, true)
            .unwrap();
        manager.disconnect().unwrap();

        assert_eq!(manager.status(), ConnectionStatus::Disconnected);
        assert!(manager.credentials().is_none());

        let reloaded =
            SettingsManager::load(storage, Arc::new(SimulatedProbe::default())).unwrap();
        assert!(!reloaded.status().is_connected());
        assert!(reloaded.preferences().message_read);
    }

    #[tokio::test]
    async fn test_connection_test_succeeds() {
        let (mut manager, _) = manager_with(Duration::from_millis(10));
        let status = manager
            .test_connection(credentials(), &CancelToken::new())
            .await
            .unwrap();
        assert!(status.is_connected());
    }

    #[tokio::test]
    async fn test_connection_test_validates_first() {
        let (mut manager, _) = manager_with(Duration::from_secs(60));
        let err = manager
            .test_connection(ApiCredentials::default(), &CancelToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SettingsError::MissingFields(_)));
    }

    #[tokio::test]
    async fn test_connection_test_cancelled() {
        let (mut manager, _) = manager_with(Duration::from_secs(60));
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = manager
            .test_connection(credentials(), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, SettingsError::Cancelled));
        assert!(!manager.status().is_connected());
    }

    #[tokio::test]
    async fn test_connection_test_rejected() {
        let storage = Arc::new(MemoryStore::new());
        let mut manager = SettingsManager::load(storage, Arc::new(RejectingProbe)).unwrap();

        let err = manager
            .test_connection(credentials(), &CancelToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SettingsError::ConnectionFailed(_)));
        assert!(manager.credentials().is_none());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(ConnectionStatus::Disconnected).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "disconnected" }));
    }
}
