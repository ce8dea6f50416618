//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub settings: SettingsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Key-value storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Keep state in memory only; nothing is written to `data_dir`
    #[serde(default)]
    pub in_memory: bool,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("switchboard").to_string_lossy().to_string())
        .unwrap_or_else(|| "./switchboard_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            in_memory: false,
        }
    }
}

impl StorageConfig {
    /// `data_dir` with a leading `~/` expanded to the home directory
    pub fn data_path(&self) -> PathBuf {
        match (self.data_dir.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.data_dir),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Socket address string for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:8080".to_string(),
        "http://127.0.0.1:8080".to_string(),
    ]
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Simulated customer replies in the chat
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_auto_reply_enabled")]
    pub auto_reply_enabled: bool,

    #[serde(default = "default_auto_reply_delay")]
    pub auto_reply_delay_ms: u64,

    #[serde(default = "default_auto_reply_text")]
    pub auto_reply_text: String,
}

fn default_auto_reply_enabled() -> bool {
    true
}

fn default_auto_reply_delay() -> u64 {
    1000
}

fn default_auto_reply_text() -> String {
    crate::chat::DEFAULT_REPLY_TEXT.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            auto_reply_enabled: default_auto_reply_enabled(),
            auto_reply_delay_ms: default_auto_reply_delay(),
            auto_reply_text: default_auto_reply_text(),
        }
    }
}

impl ChatConfig {
    pub fn auto_reply_delay(&self) -> Duration {
        Duration::from_millis(self.auto_reply_delay_ms)
    }
}

/// Messaging API settings behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsConfig {
    /// How long the simulated connection test takes
    #[serde(default = "default_connection_test_delay")]
    pub connection_test_delay_ms: u64,
}

fn default_connection_test_delay() -> u64 {
    2000
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            connection_test_delay_ms: default_connection_test_delay(),
        }
    }
}

impl SettingsConfig {
    pub fn connection_test_delay(&self) -> Duration {
        Duration::from_millis(self.connection_test_delay_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive for `tracing_subscriber::EnvFilter`
    pub fn filter_directive(&self) -> String {
        format!("switchboard={},tower_http=debug", self.level)
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("switchboard").join("config.toml")),
            Some(PathBuf::from("/etc/switchboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Storage overrides
        if let Some(data_dir) = lookup("SWITCHBOARD_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Some(flag) = lookup("SWITCHBOARD_IN_MEMORY") {
            self.storage.in_memory = parse_flag(&flag);
        }

        // API overrides
        if let Some(host) = lookup("SWITCHBOARD_API_HOST") {
            self.api.host = host;
        }
        if let Some(p) = lookup("SWITCHBOARD_API_PORT").and_then(|s| s.parse().ok()) {
            self.api.port = p;
        }

        // Chat overrides
        if let Some(flag) = lookup("SWITCHBOARD_AUTO_REPLY") {
            self.chat.auto_reply_enabled = parse_flag(&flag);
        }
        if let Some(ms) = lookup("SWITCHBOARD_AUTO_REPLY_DELAY_MS").and_then(|s| s.parse().ok()) {
            self.chat.auto_reply_delay_ms = ms;
        }

        // Logging overrides
        if let Some(level) = lookup("SWITCHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SWITCHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.to_lowercase().as_str(), "false" | "0" | "no" | "off")
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Switchboard Configuration
#
# Environment variables override these settings:
# - SWITCHBOARD_DATA_DIR
# - SWITCHBOARD_IN_MEMORY
# - SWITCHBOARD_API_HOST
# - SWITCHBOARD_API_PORT
# - SWITCHBOARD_AUTO_REPLY
# - SWITCHBOARD_AUTO_REPLY_DELAY_MS
# - SWITCHBOARD_LOG_LEVEL
# - SWITCHBOARD_LOG_FORMAT

[storage]
# Directory holding one JSON file per stored key
data_dir = "~/.local/share/switchboard"

# Keep everything in memory (state is lost on exit)
in_memory = false

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

# Allowed CORS origins
cors_origins = ["http://localhost:8080", "http://127.0.0.1:8080"]

# Request timeout in seconds
request_timeout_secs = 30

[chat]
# Post a simulated customer reply after each sent message
auto_reply_enabled = true

# Delay before the simulated reply (ms)
auto_reply_delay_ms = 1000

# Text of the simulated reply
auto_reply_text = "Thanks for your message! This is a demo response."

[settings]
# Duration of the simulated connection test (ms)
connection_test_delay_ms = 2000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
