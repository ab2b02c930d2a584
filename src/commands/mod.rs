//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and the loaded configuration.

pub mod config;
pub mod list;

// Re-export execute functions for convenience
pub use config::execute as config;
pub use list::execute as list;
