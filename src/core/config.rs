use crate::core::kernel::retry::RetryPolicy;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://yobit.net";
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_USER_AGENT: &str = "yobit-client/0.1";

#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub api_key: Option<Secret<String>>,
    pub secret_key: Option<Secret<String>>,
    pub base_url: Option<String>,
    pub timeout_ms: u64,
    pub verbose: bool,
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self::read_only()
    }
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for ExchangeConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let redact = |secret: &Option<Secret<String>>| secret.as_ref().map(|_| "[REDACTED]");

        let mut state = serializer.serialize_struct("ExchangeConfig", 7)?;
        state.serialize_field("api_key", &redact(&self.api_key))?;
        state.serialize_field("secret_key", &redact(&self.secret_key))?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("timeout_ms", &self.timeout_ms)?;
        state.serialize_field("verbose", &self.verbose)?;
        state.serialize_field("user_agent", &self.user_agent)?;
        state.serialize_field("retry", &self.retry)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ExchangeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ExchangeConfigHelper {
            #[serde(default)]
            api_key: Option<String>,
            #[serde(default)]
            secret_key: Option<String>,
            #[serde(default)]
            base_url: Option<String>,
            #[serde(default = "default_timeout_ms")]
            timeout_ms: u64,
            #[serde(default)]
            verbose: bool,
            #[serde(default = "default_user_agent")]
            user_agent: String,
            #[serde(default)]
            retry: RetryPolicy,
        }

        let helper = ExchangeConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_key: non_empty_secret(helper.api_key),
            secret_key: non_empty_secret(helper.secret_key),
            base_url: helper.base_url,
            timeout_ms: helper.timeout_ms,
            verbose: helper.verbose,
            user_agent: helper.user_agent,
            retry: helper.retry,
        })
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn non_empty_secret(value: Option<String>) -> Option<Secret<String>> {
    value.filter(|v| !v.is_empty()).map(Secret::new)
}

impl ExchangeConfig {
    /// Create a new configuration with API credentials
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self::read_only().with_credentials(api_key, secret_key)
    }

    /// Create configuration for public market data only
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            api_key: None,
            secret_key: None,
            base_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            verbose: false,
            user_agent: default_user_agent(),
            retry: RetryPolicy::default(),
        }
    }

    /// Attach credentials; empty strings are treated as absent
    #[must_use]
    pub fn with_credentials(mut self, api_key: String, secret_key: String) -> Self {
        self.api_key = non_empty_secret(Some(api_key));
        self.secret_key = non_empty_secret(Some(secret_key));
        self
    }

    /// Create configuration from environment variables
    ///
    /// Recognised variables (all optional):
    /// - `{PREFIX}_API_KEY` / `{PREFIX}_SECRET_KEY`
    /// - `{PREFIX}_BASE_URL`
    /// - `{PREFIX}_TIMEOUT_MS`
    /// - `{PREFIX}_VERBOSE`
    ///
    /// Missing credentials produce a read-only configuration.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let var = |name: &str| env::var(format!("{}_{}", prefix, name)).ok();

        let mut config = Self::read_only();
        config.api_key = non_empty_secret(var("API_KEY"));
        config.secret_key = non_empty_secret(var("SECRET_KEY"));
        config.base_url = var("BASE_URL").filter(|url| !url.is_empty());

        if let Some(raw) = var("TIMEOUT_MS") {
            config.timeout_ms = raw.parse().map_err(|_| {
                ConfigError::InvalidConfiguration(format!(
                    "{}_TIMEOUT_MS must be an integer, got '{}'",
                    prefix, raw
                ))
            })?;
        }

        if let Some(raw) = var("VERBOSE") {
            config.verbose = parse_flag(&raw).ok_or_else(|| {
                ConfigError::InvalidConfiguration(format!(
                    "{}_VERBOSE must be a boolean, got '{}'",
                    prefix, raw
                ))
            })?;
        }

        Ok(config)
    }

    /// Create configuration from .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // No file, fall back to the process environment
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Check if this configuration can sign private requests
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.secret_key.is_some()
    }

    /// Set custom base URL
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    #[must_use]
    pub const fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Effective server URL without a trailing slash
    pub fn server_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|s| s.expose_secret().as_str())
    }

    /// Get secret key (use carefully - exposes secret)
    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_ref().map(|s| s.expose_secret().as_str())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
