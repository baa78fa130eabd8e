//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/gh-pr-review/`, `~/.cache/gh-pr-review/`
//! - macOS: `~/Library/Application Support/gh-pr-review/`, `~/Library/Caches/gh-pr-review/`
//! - Windows: `%APPDATA%\gh-pr-review\`, `%LOCALAPPDATA%\gh-pr-review\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "gh-pr-review";

/// Get the application config directory, without creating it
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME))
}

/// Get the application cache directory and ensure it exists
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
    Ok(dir)
}

/// Get path to app config file
pub fn app_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Directory log files are written to
///
/// Debug builds log next to the working directory, release builds to the
/// cache directory.
pub fn log_dir() -> Result<PathBuf> {
    if cfg!(debug_assertions) {
        std::env::current_dir().context("Could not determine current directory")
    } else {
        cache_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_layout() {
        if let Some(path) = app_config_path() {
            assert!(path.ends_with("gh-pr-review/config.toml"));
        }
    }

    #[test]
    fn test_cache_dir_exists() {
        let dir = cache_dir().unwrap();
        assert!(dir.exists());
        assert!(dir.ends_with(APP_NAME));
    }

    #[test]
    #[cfg(debug_assertions)]
    fn test_debug_logs_to_current_dir() {
        assert_eq!(log_dir().unwrap(), std::env::current_dir().unwrap());
    }
}
