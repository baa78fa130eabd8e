use std::path::{Path, PathBuf};

/// Config file name looked up in the current directory
pub const CONFIG_FILE: &str = ".gh-pr-review.toml";

/// Config file locations, most specific first
///
/// 1. `.gh-pr-review.toml` in the current working directory
/// 2. `config.toml` in the platform config directory
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(path) = crate::paths::app_config_path() {
        candidates.push(path);
    }
    candidates
}

/// Load config file content from the first existing candidate
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    load_first(&config_candidates())
}

pub(crate) fn load_first<P: AsRef<Path>>(candidates: &[P]) -> Option<String> {
    candidates.iter().find_map(|path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some(content)
    })
}
