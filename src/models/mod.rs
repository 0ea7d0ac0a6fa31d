// Data models
pub mod config;
pub mod context;
pub mod payload;
