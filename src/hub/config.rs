//! Hub connection settings

use serde::Deserialize;
use std::time::Duration;

use crate::hub::error::{TransportError, TransportResult};

/// Connection settings for the SCA server.
///
/// Deserialized from the `[server]` table of the config file; the CLI and
/// environment variables may override individual values before the session is
/// built.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Server base URL, e.g. `https://hub.example.com`
    pub base_url: String,
    /// Long-lived API token exchanged for a bearer token at startup
    pub api_token: String,
    /// Request timeout in seconds, applied to every call
    pub timeout_secs: u64,
    /// Verify the server TLS certificate
    pub verify_tls: bool,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_token: String::new(),
            timeout_secs: 60,
            verify_tls: true,
        }
    }
}

impl HubConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the config is complete enough to open a session
    pub fn validate(&self) -> TransportResult<()> {
        if self.base_url.is_empty() {
            return Err(TransportError::Configuration {
                message: "server base URL is not set (flag --base-url, config [server].base_url, \
                          or SCANSYNC_BASE_URL)"
                    .to_string(),
            });
        }
        if self.api_token.is_empty() {
            return Err(TransportError::Configuration {
                message: "API token is not set (config [server].api_token or SCANSYNC_API_TOKEN)"
                    .to_string(),
            });
        }
        Ok(())
    }
}
