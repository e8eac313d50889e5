// Client configuration.
// Loads connection settings from the environment or any serde source.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";
pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.github.com/";

/// Connection settings for a [`crate::Client`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// REST API root, with trailing slash.
    pub base_url: Option<String>,
    /// Upload API root, with trailing slash.
    pub upload_url: Option<String>,
    pub token: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Read `GITHUB_TOKEN`, `GITHUB_API_URL`, `GITHUB_UPLOAD_URL` and `GITHUB_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            base_url: non_empty("GITHUB_API_URL"),
            upload_url: non_empty("GITHUB_UPLOAD_URL"),
            token: non_empty("GITHUB_TOKEN"),
            user_agent: None,
            timeout_secs: non_empty("GITHUB_TIMEOUT_SECS").and_then(|v| v.parse().ok()),
        }
    }
}
