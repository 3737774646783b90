//! Data models: parsed tables and configuration.

pub mod config;
pub mod table;
