// Configuration management

use crate::core::constants::config as keys;
use crate::core::errors::GateError;
use std::env;
use std::fmt;

/// Gate settings, fixed at startup.
#[derive(Clone, Default)]
pub struct GateConfig {
    /// Shared secret; `None` or empty disables the gate
    pub api_key: Option<String>,
    /// Methods that require the shared secret, in configured order
    pub protected_methods: Vec<String>,
}

impl fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<REDACTED>"))
            .field("protected_methods", &self.protected_methods)
            .finish()
    }
}

/// Application configuration loaded from environment variables
///
/// All values are validated on load with clear error messages.
#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub bind_address: String,
    pub port: u16,

    pub gate: GateConfig,

    // Dispatcher configuration
    pub upstream_url: String,
    pub upstream_timeout_secs: u64,

    // Middleware configuration
    pub request_timeout_secs: u64,
    pub body_size_limit_bytes: usize,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Supports `.env` file loading in development (via dotenv crate).
    pub fn from_env() -> Result<Self, GateError> {
        #[cfg(not(test))]
        {
            dotenv::dotenv().ok();
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = Source(lookup);

        let config = Self {
            bind_address: source.get_or_default(keys::ENV_BIND_ADDRESS, keys::DEFAULT_BIND_ADDRESS),
            port: source.parse_port()?,
            gate: GateConfig {
                api_key: source.get_optional(keys::ENV_API_KEY),
                protected_methods: parse_method_list(
                    &source.get_or_default(keys::ENV_PROTECTED_METHODS, ""),
                ),
            },
            upstream_url: source.get_or_default(keys::ENV_UPSTREAM_URL, keys::DEFAULT_UPSTREAM_URL),
            upstream_timeout_secs: source.parse_or_default(
                keys::ENV_UPSTREAM_TIMEOUT_SECS,
                keys::DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )?,
            request_timeout_secs: source.parse_or_default(
                keys::ENV_REQUEST_TIMEOUT_SECS,
                keys::DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            body_size_limit_bytes: source.parse_or_default(
                keys::ENV_BODY_SIZE_LIMIT_BYTES,
                keys::DEFAULT_BODY_SIZE_LIMIT_BYTES,
            )?,
            log_level: source.get_or_default(keys::ENV_LOG_LEVEL, "info"),
            log_format: source.get_or_default(keys::ENV_LOG_FORMAT, "json"),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration values
    fn validate(&self) -> Result<(), GateError> {
        url::Url::parse(&self.upstream_url).map_err(|e| {
            GateError::ConfigurationError(format!(
                "Invalid {} '{}': {}",
                keys::ENV_UPSTREAM_URL,
                self.upstream_url,
                e
            ))
        })?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(GateError::ConfigurationError(format!(
                "Invalid {} '{}': must be one of {}",
                keys::ENV_LOG_LEVEL,
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        if self.log_format != "json" && self.log_format != "text" {
            return Err(GateError::ConfigurationError(format!(
                "Invalid {} '{}': must be 'json' or 'text'",
                keys::ENV_LOG_FORMAT,
                self.log_format
            )));
        }

        Ok(())
    }

    /// Create a test configuration for unit tests
    pub fn test_config() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: keys::DEFAULT_PORT,
            gate: GateConfig {
                api_key: Some("s3cr3t".to_string()),
                protected_methods: vec!["eth_sendUserOperation".to_string()],
            },
            upstream_url: keys::DEFAULT_UPSTREAM_URL.to_string(),
            upstream_timeout_secs: 5,
            request_timeout_secs: 30,
            body_size_limit_bytes: keys::DEFAULT_BODY_SIZE_LIMIT_BYTES,
            log_level: "debug".to_string(),
            log_format: "text".to_string(),
        }
    }
}

/// Comma-separated method names: trimmed, blanks dropped, first occurrence wins
pub fn parse_method_list(raw: &str) -> Vec<String> {
    let mut methods: Vec<String> = Vec::new();
    for method in raw.split(',').map(str::trim).filter(|m| !m.is_empty()) {
        if !methods.iter().any(|existing| existing == method) {
            methods.push(method.to_string());
        }
    }
    methods
}

struct Source<F>(F);

impl<F> Source<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get_or_default(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }

    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.is_empty())
    }

    fn parse_port(&self) -> Result<u16, GateError> {
        let Some(value) = (self.0)(keys::ENV_PORT) else {
            return Ok(keys::DEFAULT_PORT);
        };
        let port = value.parse::<u16>().map_err(|e| {
            GateError::ConfigurationError(format!("Invalid PORT value '{}': {}", value, e))
        })?;

        if port == 0 {
            return Err(GateError::ConfigurationError(
                "PORT must be between 1 and 65535".to_string(),
            ));
        }

        Ok(port)
    }

    /// Parse a positive number or return the default when unset
    fn parse_or_default<T>(&self, key: &str, default: T) -> Result<T, GateError>
    where
        T: std::str::FromStr + PartialEq + Default,
        T::Err: fmt::Display,
    {
        match (self.0)(key) {
            Some(value) => {
                let parsed = value.parse::<T>().map_err(|e| {
                    GateError::ConfigurationError(format!("Invalid {} value '{}': {}", key, value, e))
                })?;

                if parsed == T::default() {
                    return Err(GateError::ConfigurationError(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            None => Ok(default),
        }
    }
}
