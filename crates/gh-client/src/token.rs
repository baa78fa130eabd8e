//! Token resolution and octocrab construction
//!
//! Works for github.com and GitHub Enterprise hosts alike.

use crate::DEFAULT_HOST;
use anyhow::{Context, Result};
use log::{debug, info};
use octocrab::Octocrab;

/// Resolves GitHub tokens for different hosts
///
/// Tries multiple sources in order:
/// 1. Host-specific env var (e.g., `GITHUB_TOKEN_GHE_EXAMPLE_COM`)
/// 2. `gh auth token --hostname {host}` command
/// 3. Generic `GITHUB_TOKEN` or `GH_TOKEN` (github.com only)
#[derive(Debug, Clone)]
pub struct TokenResolver {
    /// Cached default token from GITHUB_TOKEN/GH_TOKEN
    default_token: Option<String>,
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenResolver {
    /// Create a new token resolver
    pub fn new() -> Self {
        let default_token = std::env::var("GITHUB_TOKEN")
            .or_else(|_| std::env::var("GH_TOKEN"))
            .ok()
            .filter(|t| !t.trim().is_empty());

        Self { default_token }
    }

    /// Name of the host-specific token variable
    pub fn env_key(host: &str) -> String {
        format!(
            "GITHUB_TOKEN_{}",
            host.replace(['.', '-'], "_").to_uppercase()
        )
    }

    /// Get a token for the given host (None = github.com)
    pub async fn get_token(&self, host: Option<&str>) -> Result<String> {
        let host = host.unwrap_or(DEFAULT_HOST);

        let env_key = Self::env_key(host);
        if let Ok(token) = std::env::var(&env_key) {
            debug!("Using token from env var {} for host {}", env_key, host);
            return Ok(token);
        }

        // A missing gh binary is not fatal, the env fallback may still apply
        debug!("Trying gh auth token for host {}", host);
        match tokio::process::Command::new("gh")
            .args(["auth", "token", "--hostname", host])
            .output()
            .await
        {
            Ok(output) if output.status.success() => {
                let token = String::from_utf8(output.stdout)
                    .context("Invalid UTF-8 in gh auth token output")?
                    .trim()
                    .to_string();
                if !token.is_empty() {
                    debug!("Using token from gh CLI for host {}", host);
                    return Ok(token);
                }
            }
            Ok(_) => debug!("gh auth token has no token for host {}", host),
            Err(err) => debug!("Failed to run 'gh auth token': {}", err),
        }

        if host == DEFAULT_HOST {
            if let Some(ref token) = self.default_token {
                debug!("Using default token (GITHUB_TOKEN/GH_TOKEN) for github.com");
                return Ok(token.clone());
            }
        }

        Err(anyhow::anyhow!(
            "No token found for host '{}'. \
             Set {} or run 'gh auth login --hostname {}'",
            host,
            env_key,
            host
        ))
    }
}

/// REST base URI for a host, unless an explicit one is configured.
///
/// Returns `None` for github.com, which octocrab targets by default.
pub fn api_base_uri(host: Option<&str>, api_url: Option<&str>) -> Option<String> {
    if let Some(url) = api_url {
        return Some(url.trim_end_matches('/').to_string());
    }
    match host {
        Some(h) if h != DEFAULT_HOST => Some(format!("https://{}/api/v3", h)),
        _ => None,
    }
}

/// Build an authenticated octocrab instance for the given host
pub fn build_octocrab(host: Option<&str>, api_url: Option<&str>, token: String) -> Result<Octocrab> {
    let mut builder = Octocrab::builder().personal_token(token);

    if let Some(uri) = api_base_uri(host, api_url) {
        info!("Using GitHub API at {}", uri);
        builder = builder.base_uri(&uri).context("Failed to set base URI")?;
    }

    builder.build().context("Failed to build Octocrab client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_resolver_env_key_generation() {
        let hosts = [
            ("github.com", "GITHUB_TOKEN_GITHUB_COM"),
            ("ghe.example.com", "GITHUB_TOKEN_GHE_EXAMPLE_COM"),
            (
                "github-enterprise.corp.com",
                "GITHUB_TOKEN_GITHUB_ENTERPRISE_CORP_COM",
            ),
        ];

        for (host, expected_key) in hosts {
            assert_eq!(
                TokenResolver::env_key(host),
                expected_key,
                "Host '{}' should produce key '{}'",
                host,
                expected_key
            );
        }
    }

    #[test]
    fn test_api_base_uri() {
        assert_eq!(api_base_uri(None, None), None);
        assert_eq!(api_base_uri(Some("github.com"), None), None);
        assert_eq!(
            api_base_uri(Some("ghe.example.com"), None).as_deref(),
            Some("https://ghe.example.com/api/v3")
        );
        assert_eq!(
            api_base_uri(Some("ghe.example.com"), Some("https://api.corp/")).as_deref(),
            Some("https://api.corp")
        );
    }

    #[tokio::test]
    async fn test_build_octocrab_for_enterprise() {
        let octocrab = build_octocrab(Some("ghe.example.com"), None, "token".into());
        assert!(octocrab.is_ok());
    }
}
