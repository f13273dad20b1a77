//! Construction-time options for loggers and the request logging middleware.
//!
//! Options are plain values handed to constructors. Each middleware
//! instance freezes its own copy, so loggers with different settings can
//! coexist in one process.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use axum::http::HeaderName;

use crate::domain::attr::Attr;
use crate::domain::logger::Logger;
use crate::domain::severity::Severity;
use crate::domain::sink::LogSink;
use crate::error::OptionsError;

/// Header names that are always treated as sensitive.
pub const ALWAYS_SENSITIVE: [&str; 3] = ["authorization", "cookie", "set-cookie"];

/// Output format of the process-wide subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Text => "text",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            _ => Err(OptionsError::InvalidFormat(s.to_string())),
        }
    }
}

/// Options for the base [`Logger`] shared by every request.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use httplog::application::options::LoggerOptions;
/// use httplog::domain::severity::Severity;
/// use httplog::infrastructure::sink::MemorySink;
///
/// let logger = LoggerOptions::new()
///     .service_name("hello")
///     .level(Severity::Debug)
///     .tag("env", "dev")
///     .build(Arc::new(MemorySink::new()));
///
/// assert_eq!(logger.attrs().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerOptions {
    service_name: Option<String>,
    level: Severity,
    tags: BTreeMap<String, String>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the root `service` attribute. Empty names are ignored.
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.service_name = (!name.is_empty()).then_some(name);
        self
    }

    /// Minimum severity that reaches the sink.
    pub fn level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    /// Adds one entry to the root `tags` group.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Replaces the whole `tags` group.
    pub fn tags(mut self, tags: BTreeMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    /// Creates the base logger writing to `sink`.
    pub fn build(self, sink: Arc<dyn LogSink>) -> Logger {
        let mut attrs = Vec::new();

        if let Some(name) = self.service_name {
            attrs.push(Attr::string("service", name));
        }

        if !self.tags.is_empty() {
            let tags = self
                .tags
                .into_iter()
                .map(|(k, v)| Attr::string(k, v))
                .collect();
            attrs.push(Attr::group("tags", tags));
        }

        Logger::new(sink).with_min_level(self.level).with(attrs)
    }
}

/// Options for [`crate::api::middleware::request_logger::RequestLogger`].
///
/// `authorization`, `cookie` and `set-cookie` are always sensitive; names
/// added here extend that set. Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct RequestLoggerOptions {
    concise: bool,
    leak_sensitive_values: bool,
    sensitive_headers: HashSet<String>,
}

impl Default for RequestLoggerOptions {
    fn default() -> Self {
        Self {
            concise: false,
            leak_sensitive_values: false,
            sensitive_headers: ALWAYS_SENSITIVE.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl RequestLoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only log `uri`/`method` for requests and `size`/`status` for responses.
    pub fn concise(mut self, concise: bool) -> Self {
        self.concise = concise;
        self
    }

    /// Log sensitive header values instead of omitting them.
    pub fn leak_sensitive_values(mut self, leak: bool) -> Self {
        self.leak_sensitive_values = leak;
        self
    }

    /// Marks one header name as sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidHeaderName`] if `name` is not a valid
    /// HTTP header name.
    pub fn sensitive_header(mut self, name: &str) -> Result<Self, OptionsError> {
        let lowered = name.trim().to_ascii_lowercase();
        HeaderName::from_bytes(lowered.as_bytes())
            .map_err(|_| OptionsError::InvalidHeaderName(name.to_string()))?;
        self.sensitive_headers.insert(lowered);
        Ok(self)
    }

    /// Marks every name in `names` as sensitive.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid header name.
    pub fn sensitive_headers<I, S>(self, names: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .try_fold(self, |opts, name| opts.sensitive_header(name.as_ref()))
    }

    pub fn is_concise(&self) -> bool {
        self.concise
    }

    pub fn leaks_sensitive_values(&self) -> bool {
        self.leak_sensitive_values
    }

    pub fn sensitive_set(&self) -> &HashSet<String> {
        &self.sensitive_headers
    }

    pub fn is_sensitive(&self, name: &str) -> bool {
        self.sensitive_headers.contains(&name.to_ascii_lowercase())
    }
}
