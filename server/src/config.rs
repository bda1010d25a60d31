//! Server configuration parsed from environment variables.
//!
//! `main` loads `.env` with `dotenvy` first, so every value below can also
//! live in a local `.env` file.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_IDENTITY_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_IDENTITY_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Where the hosted identity provider lives and how to authenticate to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeouts: IdentityTimeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub identity: IdentityConfig,
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Build typed server config from the process environment.
    ///
    /// Required:
    /// - `IDENTITY_PROVIDER_URL`
    /// - `IDENTITY_PROVIDER_API_KEY`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `IDENTITY_REQUEST_TIMEOUT_SECS`: default 15
    /// - `IDENTITY_CONNECT_TIMEOUT_SECS`: default 5
    /// - `COOKIE_SECURE`: defaults to whether the provider URL is https
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = required(&lookup, "IDENTITY_PROVIDER_URL")?
            .trim_end_matches('/')
            .to_owned();
        let api_key = required(&lookup, "IDENTITY_PROVIDER_API_KEY")?;
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let timeouts = IdentityTimeouts {
            request_secs: parse_or(&lookup, "IDENTITY_REQUEST_TIMEOUT_SECS", DEFAULT_IDENTITY_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_or(&lookup, "IDENTITY_CONNECT_TIMEOUT_SECS", DEFAULT_IDENTITY_CONNECT_TIMEOUT_SECS)?,
        };
        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?,
            None => base_url.starts_with("https://"),
        };

        Ok(Self { port, identity: IdentityConfig { base_url, api_key, timeouts }, cookie_secure })
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing { var })
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { var, value: raw }),
        None => Ok(default),
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
