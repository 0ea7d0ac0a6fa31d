// Utility functions module
pub mod config;
pub mod permissions;
pub mod schema;
pub mod template;
