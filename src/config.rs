//! Fetcher configuration
//!
//! The base API URL and request defaults live in a [`FetcherConfig`] value
//! that is handed to [`crate::PagedFetcher`] when it is built. It can come
//! from a YAML file, from code through the builder, or both.
//!
//! ```yaml
//! base_url: https://example.com/wp-json/wp/v2/
//! timeout_ms: 15000
//! default_headers:
//!   X-Site: portfolio
//! category_classes:
//!   - astra-portfolio-categories
//!   - astra-portfolio-other-categories
//! ```

use crate::error::{Error, Result};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Category tags whose items get their `name` and `slug` decoded
pub const DEFAULT_CATEGORY_CLASSES: [&str; 2] = [
    "astra-portfolio-categories",
    "astra-portfolio-other-categories",
];

/// Configuration for a [`crate::PagedFetcher`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Base URL every slug is appended to
    ///
    /// May be left out of a file and supplied by the caller before validation.
    #[serde(default)]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Headers sent with every request
    #[serde(default)]
    pub default_headers: StringMap,

    /// Descriptor classes that select category decoding
    #[serde(default = "default_category_classes")]
    pub category_classes: Vec<String>,
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    format!("wprest-fetch/{}", env!("CARGO_PKG_VERSION"))
}

fn default_category_classes() -> Vec<String> {
    DEFAULT_CATEGORY_CLASSES
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl FetcherConfig {
    /// Create a config with defaults for everything but the base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            default_headers: StringMap::new(),
            category_classes: default_category_classes(),
        }
    }

    /// Create a new config builder
    pub fn builder(base_url: impl Into<String>) -> FetcherConfigBuilder {
        FetcherConfigBuilder {
            config: Self::new(base_url),
        }
    }

    /// Parse and validate a config from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config = Self::parse_yaml_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from YAML text without validating it
    ///
    /// For callers that still apply overrides before [`validate`](Self::validate).
    pub fn parse_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load and validate a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::parse_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file without validating it
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::parse_yaml_str(&contents)
    }

    /// Render the config as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }

        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.timeout_ms == 0 {
            return Err(Error::invalid_value("timeout_ms", "must be at least 1"));
        }

        Ok(())
    }

    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Whether a descriptor class selects category decoding
    pub fn is_category_class(&self, class: &str) -> bool {
        self.category_classes.iter().any(|c| c == class)
    }

    /// Append a slug to the base URL
    pub fn join_url(&self, slug: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let slug = slug.trim_start_matches('/');
        format!("{base}/{slug}")
    }
}

/// Builder for [`FetcherConfig`]
#[derive(Debug, Clone)]
pub struct FetcherConfigBuilder {
    config: FetcherConfig,
}

impl FetcherConfigBuilder {
    /// Set the request timeout (millisecond precision)
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Add a default header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Replace the recognized category classes
    #[must_use]
    pub fn category_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.category_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<FetcherConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
