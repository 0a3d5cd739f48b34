//! Console handlers module
//!
//! The interactive views of the application:
//! - Command handlers for each console command
//! - Form state for the sign-in and sign-up views

pub mod commands;
pub mod form;

// Re-export commonly used handler types
pub use commands::{Command, Console, ConsoleLine, Reply, PROMPT};
pub use form::FormState;
