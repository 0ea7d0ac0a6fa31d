// Features module
pub mod builders;
pub mod config_store;
pub mod lifecycle;
