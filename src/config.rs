use std::time::Duration;

use thiserror::Error;

use crate::constants::{
    DEFAULT_RESOLVER_MAX_REDIRECTS, DEFAULT_RESOLVER_TIMEOUT_SECS, RESOLVER_USER_AGENT,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Short-link resolver configuration.
///
/// Only the optional asynchronous resolution path reads this; `parse` never
/// performs I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Timeout for each HTTP request.
    pub timeout: Duration,
    /// Maximum redirect hops followed for one short link.
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_RESOLVER_TIMEOUT_SECS),
            max_redirects: DEFAULT_RESOLVER_MAX_REDIRECTS,
            user_agent: RESOLVER_USER_AGENT.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables.
    ///
    /// * `LINK_RESOLVER_TIMEOUT_SECS` (default 10)
    /// * `LINK_RESOLVER_MAX_REDIRECTS` (default 5)
    /// * `LINK_RESOLVER_USER_AGENT` (default: a desktop browser agent)
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed or is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            timeout: Duration::from_secs(parse_env_u64(
                "LINK_RESOLVER_TIMEOUT_SECS",
                DEFAULT_RESOLVER_TIMEOUT_SECS,
            )?),
            max_redirects: parse_env_usize(
                "LINK_RESOLVER_MAX_REDIRECTS",
                DEFAULT_RESOLVER_MAX_REDIRECTS,
            )?,
            user_agent: env_or_default("LINK_RESOLVER_USER_AGENT", RESOLVER_USER_AGENT),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "LINK_RESOLVER_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.max_redirects == 0 {
            return Err(ConfigError::InvalidValue {
                name: "LINK_RESOLVER_MAX_REDIRECTS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "LINK_RESOLVER_USER_AGENT".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}
