//! Configuration and file management for gh-pr-review
//!
//! This crate provides:
//! - Platform paths for config, cache and log files
//! - Configuration file lookup (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::{config_candidates, load_config_file, CONFIG_FILE};
