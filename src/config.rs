//! Client configuration
//!
//! `LogglyConfig` is read from a YAML file, from `LOGGLY_*` environment
//! variables, or both (environment wins).
//!
//! ```yaml
//! account: acme
//! username: reader
//! password: secret
//! customer_token: 0123-4567
//! inputs_subdomain: logs-01
//! timeout_secs: 30
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Prefix shared by all environment variables
pub const ENV_PREFIX: &str = "LOGGLY_";

/// Loggly account settings and credentials
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogglyConfig {
    /// Account subdomain used by the search API (`<account>.loggly.com`)
    #[serde(default)]
    pub account: String,

    /// API username
    #[serde(default)]
    pub username: String,

    /// API password
    #[serde(default)]
    pub password: String,

    /// Customer token for the inputs endpoint
    #[serde(default)]
    pub customer_token: String,

    /// Subdomain of the inputs endpoint
    #[serde(default = "default_inputs_subdomain")]
    pub inputs_subdomain: String,

    /// Override for the search API base URL
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Override for the inputs base URL
    #[serde(default)]
    pub inputs_base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_inputs_subdomain() -> String {
    "logs-01".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LogglyConfig {
    fn default() -> Self {
        Self {
            account: String::new(),
            username: String::new(),
            password: String::new(),
            customer_token: String::new(),
            inputs_subdomain: default_inputs_subdomain(),
            api_base_url: None,
            inputs_base_url: None,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl LogglyConfig {
    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Build a config from the process environment only
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env()
    }

    /// Override fields with any `LOGGLY_*` variables that are set
    pub fn merge_env(self) -> Result<Self> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Override fields from an arbitrary variable source
    pub fn merge_vars<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}")).filter(|v| !v.is_empty());

        if let Some(v) = var("ACCOUNT") {
            self.account = v;
        }
        if let Some(v) = var("USERNAME") {
            self.username = v;
        }
        if let Some(v) = var("PASSWORD") {
            self.password = v;
        }
        if let Some(v) = var("CUSTOMER_TOKEN") {
            self.customer_token = v;
        }
        if let Some(v) = var("INPUTS_SUBDOMAIN") {
            self.inputs_subdomain = v;
        }
        if let Some(v) = var("API_BASE_URL") {
            self.api_base_url = Some(v);
        }
        if let Some(v) = var("INPUTS_BASE_URL") {
            self.inputs_base_url = Some(v);
        }
        if let Some(v) = var("TIMEOUT_SECS") {
            self.timeout_secs = v.parse().map_err(|_| Error::InvalidConfigValue {
                field: "timeout_secs".to_string(),
                message: format!("expected a number of seconds, got '{v}'"),
            })?;
        }

        Ok(self)
    }

    /// Base URL of the search and events API
    pub fn api_base_url(&self) -> String {
        match &self.api_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.loggly.com", self.account),
        }
    }

    /// Base URL of the inputs endpoint
    pub fn inputs_base_url(&self) -> String {
        match &self.inputs_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.loggly.com", self.inputs_subdomain),
        }
    }

    /// Check the fields needed to search
    pub fn validate_for_search(&self) -> Result<()> {
        if self.api_base_url.is_none() {
            require("account", &self.account)?;
        }
        require("username", &self.username)?;
        require("password", &self.password)
    }

    /// Check the fields needed to send events
    pub fn validate_for_inputs(&self) -> Result<()> {
        require("customer_token", &self.customer_token)?;
        if self.inputs_base_url.is_none() {
            require("inputs_subdomain", &self.inputs_subdomain)?;
        }
        Ok(())
    }

    /// Credentials for the search API
    pub fn auth(&self) -> AuthConfig {
        AuthConfig::basic(&self.username, &self.password)
    }

    /// HTTP settings derived from this config
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.timeout_secs));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::missing_field(field));
    }
    Ok(())
}

impl std::fmt::Debug for LogglyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogglyConfig")
            .field("account", &self.account)
            .field("username", &self.username)
            .field("password", &"***")
            .field("customer_token", &"***")
            .field("inputs_subdomain", &self.inputs_subdomain)
            .field("api_base_url", &self.api_base_url)
            .field("inputs_base_url", &self.inputs_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}
