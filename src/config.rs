//! Configuration of the bundled server, loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `127.0.0.1:8080`)
//! - `RUST_LOG` - Subscriber filter directives (default: `info`)
//! - `LOG_FORMAT` - Subscriber format: `json` or `text` (default: `json`)
//! - `LOG_LEVEL` - Minimum severity of request records: `trace`, `debug`,
//!   `info`, `warn`, `error` or `fatal` (default: `info`)
//! - `SERVICE_NAME` - Value of the root `service` attribute (optional)
//! - `LOG_TAGS` - Root `tags` group as `key=value` pairs separated by commas
//! - `LOG_CONCISE` - Log only the essential request/response fields (default: `false`)
//! - `LOG_LEAK_SENSITIVE` - Log sensitive header values (default: `false`)
//! - `LOG_SENSITIVE_HEADERS` - Extra sensitive header names separated by commas
//!
//! `authorization`, `cookie` and `set-cookie` are always sensitive.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::env;

use crate::application::options::{LogFormat, LoggerOptions, RequestLoggerOptions};
use crate::domain::severity::Severity;
use crate::error::OptionsError;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_filter: String,
    pub log_format: LogFormat,
    /// Minimum severity of records emitted through the request logger.
    pub log_level: Severity,
    pub service_name: Option<String>,
    pub tags: BTreeMap<String, String>,
    pub concise: bool,
    /// When true, sensitive header values are logged instead of omitted.
    /// Never enable in production.
    pub leak_sensitive: bool,
    pub sensitive_headers: Vec<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `LOG_FORMAT`, `LOG_LEVEL` or `LOG_TAGS` cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_format = env::var("LOG_FORMAT")
            .ok()
            .map(|v| v.parse::<LogFormat>())
            .transpose()
            .context("Failed to parse LOG_FORMAT")?
            .unwrap_or_default();

        let log_level = env::var("LOG_LEVEL")
            .ok()
            .map(|v| v.parse::<Severity>())
            .transpose()
            .context("Failed to parse LOG_LEVEL")?
            .unwrap_or_default();

        let service_name = env::var("SERVICE_NAME").ok().filter(|v| !v.is_empty());

        let tags = env::var("LOG_TAGS")
            .ok()
            .map(|v| parse_tags(&v))
            .transpose()
            .context("Failed to parse LOG_TAGS")?
            .unwrap_or_default();

        let concise = env_flag("LOG_CONCISE");
        let leak_sensitive = env_flag("LOG_LEAK_SENSITIVE");

        let sensitive_headers = env::var("LOG_SENSITIVE_HEADERS")
            .map(|v| split_list(&v))
            .unwrap_or_default();

        Ok(Self {
            listen_addr,
            log_filter,
            log_format,
            log_level,
            service_name,
            tags,
            concise,
            leak_sensitive,
            sensitive_headers,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not in `host:port` form
    /// - a sensitive header name is not a valid HTTP header name
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        self.request_logger_options()
            .context("LOG_SENSITIVE_HEADERS contains an invalid header name")?;

        Ok(())
    }

    /// Options of the base logger shared by all requests.
    pub fn logger_options(&self) -> LoggerOptions {
        let mut options = LoggerOptions::new()
            .level(self.log_level)
            .tags(self.tags.clone());
        if let Some(name) = &self.service_name {
            options = options.service_name(name.clone());
        }
        options
    }

    /// Options of the request logging middleware.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidHeaderName`] for an invalid sensitive header.
    pub fn request_logger_options(&self) -> Result<RequestLoggerOptions, OptionsError> {
        RequestLoggerOptions::new()
            .concise(self.concise)
            .leak_sensitive_values(self.leak_sensitive)
            .sensitive_headers(&self.sensitive_headers)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log filter: {}", self.log_filter);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Request log level: {}", self.log_level);
        tracing::info!("  Concise: {}", self.concise);

        if self.leak_sensitive {
            tracing::warn!("  Sensitive header values WILL be logged");
        }

        if !self.sensitive_headers.is_empty() {
            tracing::info!(
                "  Extra sensitive headers: {}",
                self.sensitive_headers.join(", ")
            );
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `key=value,key=value` into a map.
fn parse_tags(value: &str) -> Result<BTreeMap<String, String>, OptionsError> {
    split_list(value)
        .into_iter()
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) if !k.trim().is_empty() => {
                Ok((k.trim().to_string(), v.trim().to_string()))
            }
            _ => Err(OptionsError::InvalidTag(pair)),
        })
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
