use std::time::Duration;

use thiserror::Error;

use crate::client::{ClientSettings, DEFAULT_ENDPOINT};

pub const TOKEN_VAR: &str = "WEB3_STORAGE_API_KEY";
/// Older name of the token variable, still honoured when `TOKEN_VAR` is unset.
pub const LEGACY_TOKEN_VAR: &str = "NEXT_PUBLIC_WEB3_STORAGE_API_KEY";
pub const ENDPOINT_VAR: &str = "WEB3_STORAGE_ENDPOINT";
pub const GATEWAY_VAR: &str = "IPFS_GATEWAY_HOST";
pub const TIMEOUT_VAR: &str = "UPLOAD_TIMEOUT_SECS";

const DEFAULT_GATEWAY: &str = "dweb.link";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing API token: set WEB3_STORAGE_API_KEY")]
    MissingToken,
    #[error("invalid UPLOAD_TIMEOUT_SECS value {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Process-wide settings, read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct UploaderConfig {
    pub token: String,
    pub endpoint: String,
    pub gateway_host: String,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for UploaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploaderConfig")
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("gateway_host", &self.gateway_host)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl UploaderConfig {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let token = non_empty(TOKEN_VAR)
            .or_else(|| non_empty(LEGACY_TOKEN_VAR))
            .ok_or(ConfigError::MissingToken)?;

        let request_timeout = match non_empty(TIMEOUT_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            token,
            endpoint: non_empty(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            gateway_host: non_empty(GATEWAY_VAR).unwrap_or_else(|| DEFAULT_GATEWAY.to_string()),
            request_timeout,
        })
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            request_timeout: self.request_timeout,
            ..ClientSettings::new(self.token.clone())
        }
    }
}
