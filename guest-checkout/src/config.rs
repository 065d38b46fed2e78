//! Engine configuration
//!
//! All fields can be overridden via environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | GUEST_API_BASE_URL | http://localhost:3000/api | Remote ordering API base |
//! | REQUEST_TIMEOUT_MS | 30000 | HTTP request timeout (ms) |
//! | CLOSE_RESET_GRACE_MS | 300 | Delay before the close-reset fires (ms) |

use std::time::Duration;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the remote ordering API (loyalty ledger + order creation)
    pub api_base_url: String,
    /// HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Grace delay before a surface close resets checkout state, so the
    /// close animation finishes first
    pub close_reset_grace_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            request_timeout_ms: 30_000,
            close_reset_grace_ms: 300,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: std::env::var("GUEST_API_BASE_URL")
                .unwrap_or(defaults.api_base_url),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            close_reset_grace_ms: std::env::var("CLOSE_RESET_GRACE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.close_reset_grace_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn close_reset_grace(&self) -> Duration {
        Duration::from_millis(self.close_reset_grace_ms)
    }

    /// Build the HTTP client shared by the resolver and the gateway
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout())
            .build()
    }
}
