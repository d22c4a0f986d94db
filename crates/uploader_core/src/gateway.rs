use std::fmt;

use thiserror::Error;
use url::Url;

/// Gateway used when no other host is configured.
pub const DEFAULT_GATEWAY_HOST: &str = "dweb.link";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGatewayHost {
    #[error("gateway host is empty")]
    Empty,
    #[error("gateway must be reached over https, got scheme {0}")]
    UnsupportedScheme(String),
    #[error("gateway must be a bare host without path, query or credentials: {0}")]
    NotBareHost(String),
    #[error("invalid gateway host {host}: {reason}")]
    Malformed { host: String, reason: String },
}

/// Validated gateway host, optionally with a port (`dweb.link`, `localhost:8080`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayHost(String);

impl GatewayHost {
    /// Accepts `host`, `host:port`, optionally prefixed with `https://` and with a trailing `/`.
    pub fn parse(raw: &str) -> Result<Self, InvalidGatewayHost> {
        let trimmed = raw.trim();
        let without_scheme = match trimmed.split_once("://") {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("https") => rest,
            Some((scheme, _)) => {
                return Err(InvalidGatewayHost::UnsupportedScheme(scheme.to_string()))
            }
            None => trimmed,
        };

        let host = without_scheme.trim_end_matches('/');
        if host.is_empty() {
            return Err(InvalidGatewayHost::Empty);
        }
        if host.contains(['/', '?', '#', '@']) || host.chars().any(char::is_whitespace) {
            return Err(InvalidGatewayHost::NotBareHost(host.to_string()));
        }

        let parsed = Url::parse(&format!("https://{host}/")).map_err(|err| {
            InvalidGatewayHost::Malformed {
                host: host.to_string(),
                reason: err.to_string(),
            }
        })?;
        if parsed.host_str().is_none() {
            return Err(InvalidGatewayHost::Malformed {
                host: host.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self(host.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the gateway locator for a content identifier. The identifier is used verbatim.
    pub fn link(&self, cid: &str) -> GatewayLink {
        GatewayLink {
            url: format!("https://{}/ipfs/{}", self.0, cid),
            cid: cid.to_string(),
        }
    }
}

impl Default for GatewayHost {
    fn default() -> Self {
        Self(DEFAULT_GATEWAY_HOST.to_string())
    }
}

impl fmt::Display for GatewayHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resource locator pointing at uploaded content through a gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayLink {
    url: String,
    cid: String,
}

impl GatewayLink {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn cid(&self) -> &str {
        &self.cid
    }
}

impl fmt::Display for GatewayLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
