//! Configuration for the verification pipeline
//!
//! Registry endpoints, the outbound timeout and the User-Agent strings.
//! Defaults point at the production registries.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::{
    CROSSREF_BASE_URL, ISSN_PORTAL_BASE_URL, ISSN_PORTAL_USER_AGENT, OPEN_LIBRARY_BASE_URL,
};

/// Upper bound accepted for `timeout_secs`; a submission request waits on this call
pub const MAX_TIMEOUT_SECS: u64 = 60;

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Bound on each registry call, in seconds
    pub timeout_secs: u64,
    /// User-Agent for CrossRef and Open Library
    pub user_agent: String,
    /// User-Agent for the ISSN Portal, which rejects non-browser clients
    pub issn_user_agent: String,
    pub crossref_base_url: String,
    pub issn_portal_base_url: String,
    pub open_library_base_url: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("impress-verify/{}", env!("CARGO_PKG_VERSION")),
            issn_user_agent: ISSN_PORTAL_USER_AGENT.to_string(),
            crossref_base_url: CROSSREF_BASE_URL.to_string(),
            issn_portal_base_url: ISSN_PORTAL_BASE_URL.to_string(),
            open_library_base_url: OPEN_LIBRARY_BASE_URL.to_string(),
        }
    }
}

impl VerifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point every registry at one base URL (a local mock server)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.crossref_base_url = base_url.to_string();
        self.issn_portal_base_url = base_url.to_string();
        self.open_library_base_url = base_url.to_string();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::OutOfRange(format!(
                "timeout_secs must be between 1 and {}",
                MAX_TIMEOUT_SECS
            )));
        }

        if self.user_agent.trim().is_empty() || self.issn_user_agent.trim().is_empty() {
            return Err(ConfigError::MissingField("user_agent".to_string()));
        }

        for (field, url) in [
            ("crossref_base_url", &self.crossref_base_url),
            ("issn_portal_base_url", &self.issn_portal_base_url),
            ("open_library_base_url", &self.open_library_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    field: field.to_string(),
                    url: url.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Configuration loading or validation error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("{field} is not an http(s) URL: {url}")]
    InvalidUrl { field: String, url: String },
}
