//! Application configuration
//!
//! Configuration loaded from `.gh-pr-review.toml` or the platform config
//! directory.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Application configuration loaded from `.gh-pr-review.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Web URL of the GitHub instance (e.g., "https://ghe.example.com")
    #[serde(default)]
    pub github_url: Option<String>,

    /// REST API base, when it doesn't follow the `https://{host}/api/v3` rule
    #[serde(default)]
    pub api_url: Option<String>,

    /// Repository used when none is given and no git remote is found
    #[serde(default)]
    pub default_repo: Option<String>,

    /// Review body for approvals submitted without text
    #[serde(default = "default_approval_message")]
    pub approval_message: String,

    /// Show the line number gutter in the diff view
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,

    /// Default log level when `RUST_LOG` is not set
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_approval_message() -> String {
    "Approved".to_string()
}

fn default_show_line_numbers() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github_url: None,
            api_url: None,
            default_repo: None,
            approval_message: default_approval_message(),
            show_line_numbers: default_show_line_numbers(),
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then the config directory, or use defaults
    pub fn load() -> Self {
        match crate::load_config_file() {
            Some(content) => Self::from_toml(&content),
            None => {
                log::debug!("Using default app config");
                Self::default()
            }
        }
    }

    /// Parse config content, falling back to defaults on error
    pub fn from_toml(content: &str) -> Self {
        match toml::from_str(content) {
            Ok(config) => {
                log::info!("Loaded app config from file");
                config
            }
            Err(e) => {
                log::warn!("Failed to parse config file: {}", e);
                Self::default()
            }
        }
    }

    /// Host name of `github_url`, if configured
    pub fn github_host(&self) -> Option<String> {
        let url = self.github_url.as_deref()?;
        let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
        without_scheme
            .split('/')
            .next()
            .filter(|host| !host.is_empty())
            .map(str::to_string)
    }

    /// Configured log level, ignoring values `log` doesn't know
    pub fn log_level_filter(&self) -> Option<LevelFilter> {
        let level = self.log_level.as_deref()?;
        match LevelFilter::from_str(level) {
            Ok(filter) => Some(filter),
            Err(_) => {
                log::warn!("Unknown log level '{}' in config", level);
                None
            }
        }
    }
}
