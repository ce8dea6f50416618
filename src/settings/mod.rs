//! API Settings
//!
//! Credentials for the business messaging API, the connection status and
//! notification preferences.
//!
//! - **credentials**: `ApiCredentials`, `NotificationPreferences`
//! - **manager**: `SettingsManager` plus the `ConnectionProbe` seam
//! - **error**: Error types

pub mod credentials;
pub mod error;
pub mod manager;

pub use credentials::{ApiCredentials, NotificationKind, NotificationPreferences};
pub use error::{SettingsError, SettingsResult};
pub use manager::{
    verify_credentials, ConnectionProbe, ConnectionStatus, SettingsManager, SimulatedProbe,
    SETTINGS_KEY,
};
