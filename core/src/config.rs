//! Client configuration.
//!
//! The token is the only credential Chatwork uses; the base URL is
//! overridable so the client can be pointed at the bundled mock server.

use std::fmt;

use crate::client::DEFAULT_BASE_URL;
use crate::error::ConfigError;

pub const TOKEN_ENV: &str = "CHATWORK_API_TOKEN";
pub const BASE_URL_ENV: &str = "CHATWORK_BASE_URL";

/// API token sent in the `X-ChatWorkToken` header. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        ApiToken(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

impl From<&str> for ApiToken {
    fn from(s: &str) -> Self {
        ApiToken::new(s)
    }
}

impl From<String> for ApiToken {
    fn from(s: String) -> Self {
        ApiToken(s)
    }
}

#[derive(Debug, Clone)]
pub struct ChatworkConfig {
    pub api_token: ApiToken,
    pub base_url: String,
}

impl ChatworkConfig {
    pub fn new(api_token: impl Into<ApiToken>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read `CHATWORK_API_TOKEN` and, optionally, `CHATWORK_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_ENV).ok_or(ConfigError::Missing(TOKEN_ENV))?;
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::Empty(TOKEN_ENV));
        }
        let base_url = lookup(BASE_URL_ENV)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            api_token: ApiToken::new(token),
            base_url,
        })
    }
}
