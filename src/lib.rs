//! # Switchboard
//!
//! Business messaging dashboard - message templates with `{{name}}`
//! placeholders, API connection settings, a customer chat view and delivery
//! statistics, served over a REST API.
//!
//! ## Modules
//!
//! - [`template`]: Placeholder extraction, rendering and the template store
//! - [`storage`]: Key-value persistence (in-memory or JSON files)
//! - [`settings`]: API credentials, connection testing and notifications
//! - [`chat`]: Contacts, transcripts and simulated replies
//! - [`dashboard`]: Messaging statistics
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust
//! use switchboard::template::{extract_variables, render, RenderContext};
//!
//! let message = "Hi {{customer_name}}! Your order {{order_id}} has shipped.";
//! assert_eq!(extract_variables(message), vec!["customer_name", "order_id"]);
//!
//! let values = RenderContext::new().with("customer_name", "Ann");
//! assert_eq!(
//!     render(message, &values),
//!     "Hi Ann! Your order {{order_id}} has shipped."
//! );
//! ```

pub mod api;
pub mod cancel;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod settings;
pub mod storage;
pub mod template;

// Re-export top-level types for convenience
pub use template::{
    extract_variables, render, Preview, RenderContext, Template, TemplateError, TemplateStore,
};

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};

pub use settings::{
    ApiCredentials, ConnectionProbe, ConnectionStatus, SettingsError, SettingsManager,
    SimulatedProbe,
};

pub use chat::{AutoResponder, ChatError, ChatSession, Contact, Message, Sender};

pub use dashboard::Dashboard;

pub use cancel::CancelToken;

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};
