use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.crowdstrike.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport configuration for the remote API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL; all endpoint paths are resolved against it.
    pub base_url: String,
    /// Timeout applied to every HTTP exchange.
    pub timeout: Duration,
    /// When `false`, TLS certificate verification is disabled.
    pub verify_tls: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verify_tls: true,
        }
    }
}
