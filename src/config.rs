use std::time::Duration;

use serde::Deserialize;

/// Name of the environment variable holding the YouTube Data API key.
///
/// `envy` lowercases variable names, so `youtube_API` and `YOUTUBE_API` both land
/// in [`Config::youtube_api`].
pub const CREDENTIAL_ENV_VAR: &str = "youtube_API";

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// YouTube Data API key. Only the proxy ever reads it.
    #[serde(default)]
    pub youtube_api: Option<String>,

    /// YouTube Data API base URL
    #[serde(default = "default_youtube_api_url")]
    pub youtube_api_url: String,

    /// Result count used when the caller sends none (or garbage)
    #[serde(default = "default_max_results")]
    pub default_max_results: u32,

    /// Upper bound for the result count
    #[serde(default = "default_max_results_cap")]
    pub max_results_cap: u32,

    /// Timeout for outgoing search calls, in seconds. Unset leaves the
    /// transport default in place.
    #[serde(default)]
    pub upstream_timeout_secs: Option<u64>,

    /// Proxy endpoint used by the command-line client
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_youtube_api_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_max_results() -> u32 {
    6
}

fn default_max_results_cap() -> u32 {
    12
}

fn default_proxy_url() -> String {
    "http://127.0.0.1:3000/api/v1/youtube-search".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            youtube_api: None,
            youtube_api_url: default_youtube_api_url(),
            default_max_results: default_max_results(),
            max_results_cap: default_max_results_cap(),
            upstream_timeout_secs: None,
            proxy_url: default_proxy_url(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The API key, if one is provisioned. Blank values count as missing.
    ///
    /// Read once when the config loads, so provisioning a key needs a restart.
    pub fn api_key(&self) -> Option<&str> {
        self.youtube_api
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_secs.map(Duration::from_secs)
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
