//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::api::error::ApiResult;
use crate::cancel::CancelToken;
use crate::chat::{AutoResponder, ChatSession, SharedSession};
use crate::config::{ApiConfig, Config};
use crate::settings::{ConnectionProbe, SettingsManager, SimulatedProbe};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::template::TemplateStore;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Backing key-value store
    pub storage: Arc<dyn KeyValueStore>,
    /// Message templates
    pub templates: Arc<RwLock<TemplateStore>>,
    /// Messaging API settings
    pub settings: Arc<RwLock<SettingsManager>>,
    /// Contacts and transcripts
    pub chat: SharedSession,
    /// Simulated customer replies (None when disabled)
    pub responder: Option<AutoResponder>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Fires when the server shuts down
    pub shutdown: CancelToken,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state over `storage` with mock chat data and the default responder
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        probe: Arc<dyn ConnectionProbe>,
        config: ApiConfig,
    ) -> ApiResult<Self> {
        let templates = TemplateStore::load(Arc::clone(&storage))?;
        let settings = SettingsManager::load(Arc::clone(&storage), probe)?;
        let chat = ChatSession::with_fixtures(chrono::Utc::now());

        Ok(Self {
            storage,
            templates: Arc::new(RwLock::new(templates)),
            settings: Arc::new(RwLock::new(settings)),
            chat: Arc::new(RwLock::new(chat)),
            responder: Some(AutoResponder::default()),
            config: Arc::new(config),
            shutdown: CancelToken::new(),
            start_time: Instant::now(),
        })
    }

    /// Create state from the full application configuration
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let storage: Arc<dyn KeyValueStore> = if config.storage.in_memory {
            tracing::info!("Using in-memory storage");
            Arc::new(MemoryStore::new())
        } else {
            let store = FileStore::open(config.storage.data_path())?;
            tracing::info!("Data directory: {:?}", store.data_dir());
            Arc::new(store)
        };

        let probe = Arc::new(SimulatedProbe::new(config.settings.connection_test_delay()));

        let responder = config.chat.auto_reply_enabled.then(|| {
            AutoResponder::new(config.chat.auto_reply_delay(), config.chat.auto_reply_text.clone())
        });

        Ok(Self::new(storage, probe, config.api.clone())?.with_responder(responder))
    }

    /// Replace the auto-responder
    pub fn with_responder(mut self, responder: Option<AutoResponder>) -> Self {
        self.responder = responder;
        self
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Cancel background work tied to this state
    pub fn begin_shutdown(&self) {
        self.shutdown.cancel();
        if let Some(responder) = &self.responder {
            responder.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_config_in_memory() {
        let mut config = Config::default();
        config.storage.in_memory = true;
        config.chat.auto_reply_enabled = false;

        let state = AppState::from_config(&config).unwrap();
        assert!(state.responder.is_none());
        assert_eq!(state.templates.read().await.len(), 3);
        assert!(!state.settings.read().await.status().is_connected());
    }

    #[tokio::test]
    async fn test_file_backed_state_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.storage.data_dir = dir.path().to_string_lossy().to_string();

        {
            let state = AppState::from_config(&config).unwrap();
            state.templates.write().await.delete("1").unwrap();
        }

        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.templates.read().await.len(), 2);
        assert!(state.responder.is_some());
    }

    #[test]
    fn test_begin_shutdown_cancels() {
        let config = Config {
            storage: crate::config::StorageConfig {
                in_memory: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let state = AppState::from_config(&config).unwrap();

        state.begin_shutdown();
        assert!(state.shutdown.is_cancelled());
    }
}
