//! Switchboard Storage
//!
//! Injected key-value persistence for the dashboard state:
//!
//! - **kv**: the [`KeyValueStore`] capability plus memory and file stores
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use switchboard::storage::{FileStore, KeyValueStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileStore::open("./switchboard_data")?;
//!     store.set("greeting", "\"hello\"")?;
//!     assert_eq!(store.get("greeting")?.as_deref(), Some("\"hello\""));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod kv;

pub use error::{StorageError, StorageResult};
pub use kv::{load_json, save_json, FileStore, KeyValueStore, MemoryStore};
