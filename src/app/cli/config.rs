//! TOML configuration file loading
//!
//! An explicitly named config file must exist; otherwise the default path
//! under the user config directory is used when present. Command-line flags
//! always win over file values; environment variables fill in the secrets
//! that should not live in either.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::hub::api::HubConfig;

/// Environment variable consulted for the API token
pub const ENV_API_TOKEN: &str = "SCANSYNC_API_TOKEN";
/// Environment variable consulted for the server base URL
pub const ENV_BASE_URL: &str = "SCANSYNC_BASE_URL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: HubConfig,
    pub upload: UploadSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Maximum project-version lookup attempts
    pub retry_attempts: usize,
    /// Seconds between lookup attempts
    pub retry_delay_secs: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            retry_attempts: 4,
            retry_delay_secs: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
}

impl FileConfig {
    /// Default config file location under the user config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("scansync").join("scansync.toml"))
    }

    /// Load the config file, if any.
    ///
    /// A user-specified file that does not exist is an error; a missing
    /// default file just yields the built-in defaults.
    pub fn load(config_file: Option<&Path>) -> Result<Self, String> {
        let config_path = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(format!(
                        "The specified configuration file does not exist: {}",
                        path.display()
                    ));
                }
                Some(path.to_path_buf())
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Some(path),
                _ => None,
            },
        };

        let Some(path) = config_path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            format!(
                "Error reading configuration file {}: {}",
                path.display(),
                e
            )
        })?;
        toml::from_str(&contents).map_err(|e| {
            format!(
                "Error parsing configuration file {}: {}",
                path.display(),
                e
            )
        })
    }

    /// Pull connection values from the environment: the token always wins
    /// over the file (secrets should not live in config), the base URL only
    /// fills a gap.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(ENV_API_TOKEN) {
            if !token.is_empty() {
                self.server.api_token = token;
            }
        }
        if self.server.base_url.is_empty() {
            if let Ok(url) = std::env::var(ENV_BASE_URL) {
                self.server.base_url = url.trim_end_matches('/').to_string();
            }
        }
    }
}
