//! Client configuration, read once from the environment.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TOKEN_KEY: &str = "access_token";
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_LOGIN_ENDPOINT: &str = "/auth/login";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash.
    pub api_url: String,
    /// Name under which the bearer token is stored.
    pub token_key: String,
    /// Where the UI is sent when the session expires.
    pub login_route: String,
    /// API path that exchanges credentials for a token.
    pub login_endpoint: String,
    /// Fixed per-request timeout.
    pub timeout: Duration,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            login_endpoint: DEFAULT_LOGIN_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup("SHELFWISE_API_URL") {
            Some(url) => Self::new(url),
            None => Self::default(),
        };

        if let Some(key) = lookup("SHELFWISE_TOKEN_KEY") {
            if key.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: "SHELFWISE_TOKEN_KEY",
                    value: key,
                });
            }
            config.token_key = key;
        }
        if let Some(route) = lookup("SHELFWISE_LOGIN_ROUTE") {
            config.login_route = route;
        }
        if let Some(raw) = lookup("SHELFWISE_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "SHELFWISE_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
