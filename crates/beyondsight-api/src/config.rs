use serde::Deserialize;
use std::time::Duration;

/// Tool listing endpoint of a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1/mcp/tools";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub request_timeout: Option<u64>,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout = Some(seconds);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(default_base_url())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
