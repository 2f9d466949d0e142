//! Configuration management for sitesmith
//!
//! Settings are loaded from environment variables with sensible defaults.
//! Only `chat` talks to the completion backend, so the API key is optional
//! until a client is built.
//!
//! # Environment Variables
//!
//! - `SITESMITH_API_URL`: Chat completions endpoint - default: DeepSeek
//! - `SITESMITH_API_KEY`: Bearer token - required by `chat`
//! - `SITESMITH_MODEL`: Model name - default: "deepseek-chat"
//! - `SITESMITH_MAX_TOKENS`: Completion token cap - default: "10000"
//! - `SITESMITH_HISTORY_LIMIT`: Messages kept in a session - default: "10"
//! - `SITESMITH_MAX_RETRIES`: Attempts per request - default: "3"
//! - `SITESMITH_RETRY_BASE_MS`: Backoff base in milliseconds - default: "1000"
//! - `SITESMITH_REQUEST_TIMEOUT`: Timeout in seconds - default: "60"
//! - `SITESMITH_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use sitesmith::SitesmithConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SitesmithConfig::default();
//! config.validate()?;
//!
//! let client = config.create_client()?;
//! # Ok(())
//! # }
//! ```

use crate::llm::{BackendError, CompletionClient, RetryPolicy, RetryingClient};
use crate::session::{SessionConfig, DEFAULT_HISTORY_LIMIT, DEFAULT_SYSTEM_PROMPT};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "deepseek-chat";
const DEFAULT_MAX_TOKENS: u32 = 10_000;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_BASE_MS: u64 = 1_000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    #[error("API key not set. Set the SITESMITH_API_KEY environment variable")]
    MissingApiKey,

    #[error("Client initialization failed: {0}")]
    ClientInitError(#[from] BackendError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitesmithConfig {
    pub api_url: String,

    pub api_key: Option<String>,

    pub model: String,

    pub max_tokens: u32,

    /// User/assistant messages kept per session
    pub history_limit: usize,

    /// Total attempts per completion request, including the first
    pub max_retries: u32,

    pub retry_base_ms: u64,

    pub request_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for SitesmithConfig {
    /// Loads from `SITESMITH_*` environment variables
    ///
    /// Values that are missing or fail to parse fall back to their defaults;
    /// use [`SitesmithConfig::from_env`] to surface parse failures instead.
    fn default() -> Self {
        Self {
            api_url: env::var("SITESMITH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key: env::var("SITESMITH_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            model: env::var("SITESMITH_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            max_tokens: env_parsed("SITESMITH_MAX_TOKENS")
                .ok()
                .flatten()
                .unwrap_or(DEFAULT_MAX_TOKENS),
            history_limit: env_parsed("SITESMITH_HISTORY_LIMIT")
                .ok()
                .flatten()
                .unwrap_or(DEFAULT_HISTORY_LIMIT),
            max_retries: env_parsed("SITESMITH_MAX_RETRIES")
                .ok()
                .flatten()
                .unwrap_or(DEFAULT_MAX_RETRIES),
            retry_base_ms: env_parsed("SITESMITH_RETRY_BASE_MS")
                .ok()
                .flatten()
                .unwrap_or(DEFAULT_RETRY_BASE_MS),
            request_timeout_secs: env_parsed("SITESMITH_REQUEST_TIMEOUT")
                .ok()
                .flatten()
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_level: env::var("SITESMITH_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
        }
    }
}

/// Reads and parses an environment variable; `Ok(None)` when unset
fn env_parsed<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::ParseError {
                field: key.to_string(),
                error: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

impl SitesmithConfig {
    /// Like `default()`, but a numeric variable that fails to parse is an error
    pub fn from_env() -> Result<Self, ConfigError> {
        env_parsed::<u32>("SITESMITH_MAX_TOKENS")?;
        env_parsed::<usize>("SITESMITH_HISTORY_LIMIT")?;
        env_parsed::<u32>("SITESMITH_MAX_RETRIES")?;
        env_parsed::<u64>("SITESMITH_RETRY_BASE_MS")?;
        env_parsed::<u64>("SITESMITH_REQUEST_TIMEOUT")?;
        Ok(Self::default())
    }

    /// Validates the configuration
    ///
    /// Checks numeric ranges, the endpoint scheme and the log level. A missing
    /// API key is not an error here; [`create_client`](Self::create_client)
    /// reports it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed(format!(
                "API URL must start with http:// or https://: {}",
                self.api_url
            )));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Model name cannot be empty".to_string(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max tokens must be at least 1".to_string(),
            ));
        }

        if self.history_limit == 0 || self.history_limit > 1000 {
            return Err(ConfigError::ValidationFailed(
                "History limit must be between 1 and 1000".to_string(),
            ));
        }

        if self.max_retries == 0 || self.max_retries > 10 {
            return Err(ConfigError::ValidationFailed(
                "Max retries must be between 1 and 10".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.retry_base_ms))
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            history_limit: self.history_limit,
            max_tokens: Some(self.max_tokens),
        }
    }

    /// Builds the retrying completion client
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingApiKey` without a key, or
    /// `ConfigError::ClientInitError` if the HTTP client can't be built.
    pub fn create_client(&self) -> Result<RetryingClient<CompletionClient>, ConfigError> {
        let api_key = self.api_key.clone().ok_or(ConfigError::MissingApiKey)?;

        let client = CompletionClient::new(
            self.api_url.clone(),
            self.model.clone(),
            Some(api_key),
            Duration::from_secs(self.request_timeout_secs),
        )?;

        Ok(RetryingClient::new(client, self.retry_policy()))
    }

    fn redacted_api_key(&self) -> &'static str {
        if self.api_key.is_some() {
            "********"
        } else {
            "(not set)"
        }
    }

    /// Converts configuration to a display map for output formatting
    ///
    /// The API key is redacted.
    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("api_url".to_string(), self.api_url.clone());
        map.insert("api_key".to_string(), self.redacted_api_key().to_string());
        map.insert("model".to_string(), self.model.clone());
        map.insert("max_tokens".to_string(), self.max_tokens.to_string());
        map.insert("history_limit".to_string(), self.history_limit.to_string());
        map.insert("max_retries".to_string(), self.max_retries.to_string());
        map.insert("retry_base_ms".to_string(), self.retry_base_ms.to_string());
        map.insert(
            "request_timeout_secs".to_string(),
            self.request_timeout_secs.to_string(),
        );
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for SitesmithConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sitesmith Configuration:")?;
        writeln!(f, "  API URL: {}", self.api_url)?;
        writeln!(f, "  API Key: {}", self.redacted_api_key())?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  Max Tokens: {}", self.max_tokens)?;
        writeln!(f, "  History Limit: {}", self.history_limit)?;
        writeln!(f, "  Max Retries: {}", self.max_retries)?;
        writeln!(f, "  Retry Base: {}ms", self.retry_base_ms)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
