//! Connection configuration.

use std::fmt;

use crate::error::ClientError;

/// Environment key for the REST base URL.
pub const ENV_URL: &str = "CAMUNDA_URL";
/// Environment key for the basic-auth username.
pub const ENV_USERNAME: &str = "CAMUNDA_USERNAME";
/// Environment key for the basic-auth password.
pub const ENV_PASSWORD: &str = "CAMUNDA_PASSWORD";
/// Environment key for the authentication mode.
pub const ENV_AUTH_TYPE: &str = "CAMUNDA_AUTH_TYPE";
/// Environment key for the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "CAMUNDA_TIMEOUT";

pub const DEFAULT_URL: &str = "http://localhost:8080/engine-rest";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How requests authenticate against the engine.
///
/// Only [`AuthMode::Basic`] attaches credentials; the other modes are stored
/// so the configured value survives resolution unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Basic,
    OAuth,
    None,
    /// Any other configured value, kept verbatim.
    Other(String),
}

impl AuthMode {
    pub fn parse(value: &str) -> Self {
        match value {
            "basic" => Self::Basic,
            "oauth" => Self::OAuth,
            "none" => Self::None,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic => "basic",
            Self::OAuth => "oauth",
            Self::None => "none",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything needed to reach one engine.
#[derive(Clone, PartialEq)]
pub struct ConnectionProfile {
    /// REST API root, e.g. `http://localhost:8080/engine-rest`.
    pub base_url: String,

    pub username: Option<String>,
    pub password: Option<String>,
    pub auth_mode: AuthMode,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ConnectionProfile {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            username: None,
            password: None,
            auth_mode: AuthMode::Basic,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("auth_mode", &self.auth_mode)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ConnectionProfile {
    /// Resolve a profile from a key-value source.
    ///
    /// Keys are the `CAMUNDA_*` names. Missing keys fall back to the defaults.
    /// A timeout that is not an unsigned integer fails here rather than on the
    /// first request.
    pub fn resolve<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup(ENV_TIMEOUT) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ClientError::Config {
                key: ENV_TIMEOUT,
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: lookup(ENV_URL).unwrap_or_else(|| DEFAULT_URL.to_string()),
            username: lookup(ENV_USERNAME),
            password: lookup(ENV_PASSWORD),
            auth_mode: lookup(ENV_AUTH_TYPE)
                .map(|mode| AuthMode::parse(&mode))
                .unwrap_or_default(),
            timeout_secs,
        })
    }

    /// Resolve a profile from the process environment.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Basic credentials to attach to every request, if any.
    pub fn basic_credentials(&self) -> Option<(&str, &str)> {
        match (&self.auth_mode, &self.username) {
            (AuthMode::Basic, Some(user)) => {
                Some((user.as_str(), self.password.as_deref().unwrap_or("")))
            }
            _ => None,
        }
    }
}
