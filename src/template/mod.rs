//! Message Templates
//!
//! - **engine**: `{{name}}` placeholder extraction and rendering (pure functions)
//! - **types**: `Template`, `RenderContext`, `Preview`
//! - **store**: `TemplateStore`, persisted through an injected key-value store
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use switchboard::template::{extract_variables, render, RenderContext};
//!
//! let message = "Hi {{customer_name}}! Your order {{order_id}} has shipped.";
//! assert_eq!(extract_variables(message), vec!["customer_name", "order_id"]);
//!
//! let values = RenderContext::new().with("customer_name", "Jane");
//! assert_eq!(
//!     render(message, &values),
//!     "Hi Jane! Your order {{order_id}} has shipped."
//! );
//! ```

pub mod engine;
pub mod error;
pub mod store;
pub mod types;

pub use engine::{distinct_variables, extract_variables, render, unresolved_variables};
pub use error::{TemplateError, TemplateResult};
pub use store::{default_templates, TemplateStore, TEMPLATES_KEY};
pub use types::{Preview, RenderContext, Template};
