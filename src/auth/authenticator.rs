//! Authenticator implementation
//!
//! Builds the authorization headers for a set of credentials.

use super::types::AuthConfig;
use crate::error::{Error, Result};
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// Turns an [`AuthConfig`] into request headers
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Build the header map carrying these credentials
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        match &self.config {
            AuthConfig::None => {}

            AuthConfig::Basic { username, password } => {
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{username}:{password}"));
                headers.insert(AUTHORIZATION, sensitive_value(&format!("Basic {encoded}"))?);
            }
        }

        Ok(headers)
    }
}

fn sensitive_value(value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value).map_err(|e| Error::InvalidConfigValue {
        field: "authorization".to_string(),
        message: e.to_string(),
    })?;
    value.set_sensitive(true);
    Ok(value)
}
