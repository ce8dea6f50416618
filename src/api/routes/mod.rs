//! API Routes
//!
//! Route handlers organized by functionality.

pub mod chat;
pub mod dashboard;
pub mod health;
pub mod settings;
pub mod templates;
