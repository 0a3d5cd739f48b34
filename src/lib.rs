//! EventicHub
//!
//! Console client for an event management platform hosted on a managed
//! backend. This library provides the session manager, a data access layer
//! with one repository per table, and the console views built on top of them.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventicHubError, Result};

// Re-export main components for easy access
pub use database::{BackendClient, DataService};
pub use services::{AuthClient, ServiceFactory, SessionManager};
pub use handlers::Console;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
