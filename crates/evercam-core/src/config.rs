//! Configuration for Evercam clients.
//!
//! [`EvercamConfig`] enumerates every option the client recognises. It can be
//! assembled with the fluent `with_*` setters or deserialised from any serde
//! format; unknown keys are rejected rather than silently ignored.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use validator::Validate;

use crate::error::{ApiError, Result};

/// Default API host.
pub const DEFAULT_HOST: &str = "media.evercam.io";
/// Default URL scheme.
pub const DEFAULT_SCHEME: &str = "https";
/// Default API version segment.
pub const DEFAULT_VERSION: &str = "2";

/// Wire key carrying the API identifier.
pub const API_ID_PARAM: &str = "api_id";
/// Wire key carrying the API secret.
pub const API_KEY_PARAM: &str = "api_key";
/// Wire key carrying the agent string.
pub const AGENT_PARAM: &str = "agent";
/// Wire key carrying the requester IP address.
pub const REQUESTER_IP_PARAM: &str = "requester_ip";
/// Wire key carrying the requester country code.
pub const COUNTRY_CODE_PARAM: &str = "u_country_code";
/// Wire key carrying the requester country name.
pub const COUNTRY_PARAM: &str = "u_country";

/// Configuration for an Evercam client instance.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EvercamConfig {
    /// API identifier
    #[serde(default)]
    pub api_id: Option<String>,

    /// API secret key
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub api_key: Option<SecretString>,

    /// Agent string forwarded with every request
    #[serde(default)]
    pub agent: Option<String>,

    /// IP address of the party the request is made on behalf of
    #[serde(default)]
    #[validate(ip)]
    pub requester_ip: Option<String>,

    /// Requester country name
    #[serde(default)]
    pub country: Option<String>,

    /// Requester country code
    #[serde(default)]
    pub country_code: Option<String>,

    /// API host name
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    /// Explicit port; the scheme's standard port is used when unset
    #[serde(default)]
    #[validate(range(min = 1))]
    pub port: Option<u16>,

    /// URL scheme, `http` or `https`
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// API version, inserted as `/v{version}`
    #[serde(default = "default_version")]
    #[validate(length(min = 1))]
    pub version: String,

    /// Transport-level request timeout in seconds; none is imposed when unset
    #[serde(default)]
    #[validate(range(min = 1, max = 3600))]
    pub timeout_secs: Option<u64>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

impl EvercamConfig {
    /// Create a configuration with every option at its default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_id: None,
            api_key: None,
            agent: None,
            requester_ip: None,
            country: None,
            country_code: None,
            host: default_host(),
            port: None,
            scheme: default_scheme(),
            version: default_version(),
            timeout_secs: None,
        }
    }

    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed input, unknown keys, or
    /// values that fail validation.
    pub fn from_json(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ApiError::config(format!("Invalid configuration: {e}")))?;
        config.validate_settings()?;
        Ok(config)
    }

    /// Set the API credentials.
    #[must_use]
    pub fn with_credentials(mut self, api_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.api_id = Some(api_id.into());
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Set the agent string.
    #[must_use]
    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    /// Set the requester IP address.
    #[must_use]
    pub fn with_requester_ip(mut self, ip: impl Into<String>) -> Self {
        self.requester_ip = Some(ip.into());
        self
    }

    /// Set the requester country name.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the requester country code.
    #[must_use]
    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    /// Set the API host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set an explicit port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the URL scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set the API version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set a transport-level timeout in seconds.
    #[must_use]
    pub const fn with_timeout_secs(mut self, seconds: u64) -> Self {
        self.timeout_secs = Some(seconds);
        self
    }

    /// Run field validation and the scheme check.
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first problem found.
    pub fn validate_settings(&self) -> Result<()> {
        self.validate()?;
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(ApiError::config(format!(
                "Unsupported scheme `{}`",
                self.scheme
            )));
        }
        Ok(())
    }

    /// Returns the API identifier and key when both are configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.api_id, &self.api_key) {
            (Some(id), Some(key)) => Some((id.as_str(), key.expose_secret())),
            _ => None,
        }
    }

    /// Get the transport timeout as a Duration, if set.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// `scheme://host[:port]`.
    #[must_use]
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{port}", self.scheme, self.host),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }

    /// Versioned path for an endpoint suffix.
    #[must_use]
    pub fn api_path(&self, suffix: &str) -> String {
        format!("/v{}{suffix}", self.version)
    }

    /// Fully qualified URL for an endpoint suffix.
    #[must_use]
    pub fn endpoint_url(&self, suffix: &str) -> String {
        format!("{}{}", self.base_url(), self.api_path(suffix))
    }
}

impl Default for EvercamConfig {
    fn default() -> Self {
        Self::new()
    }
}
