//! Error types for wprest-fetch
//!
//! All fallible APIs return `Result<T, Error>` where Error is defined here.
//! The fetcher itself never returns these to its caller: they are turned
//! into notifications (see [`crate::notify`]).

use thiserror::Error;

/// The main error type for wprest-fetch
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// General configuration problem, such as an unreadable config file
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A required field was absent or empty
    #[error("Missing required config field: {field}")]
    MissingConfigField {
        /// Name of the missing field
        field: String,
    },

    /// A field was present but its value is unusable
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue {
        /// Name of the offending field
        field: String,
        /// Why the value was rejected
        message: String,
    },

    /// The config file is not valid YAML for [`crate::FetcherConfig`]
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON (de)serialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// The request could not be sent or its body not read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("HTTP {status} {status_text}")]
    HttpStatus {
        /// Numeric status code
        status: u16,
        /// Canonical reason phrase
        status_text: String,
        /// Response body as text
        body: String,
    },

    /// No response within the configured timeout
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed, in milliseconds
        timeout_ms: u64,
    },

    /// A URL failed to parse
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Response Errors
    // ============================================================================
    /// The body is not a collection page
    #[error("Failed to decode response: {message}")]
    Decode {
        /// What was wrong with the body
        message: String,
    },

    /// The total-count header is missing or not an unsigned integer
    #[error("Response is missing a usable '{header}' header")]
    MissingTotalCount {
        /// Header that was looked up
        header: String,
    },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(
        status: u16,
        status_text: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::HttpStatus {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a missing total-count error
    pub fn missing_total(header: impl Into<String>) -> Self {
        Self::MissingTotalCount {
            header: header.into(),
        }
    }

    /// True for failures where no usable response came back from the server.
    ///
    /// Everything else reaching the fetcher is a soft data error: the server
    /// answered, but not with a classifiable page.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::HttpStatus { .. }
                | Error::Timeout { .. }
                | Error::InvalidUrl(_)
                | Error::MissingConfigField { .. }
        )
    }

    /// Short status text for failure reports, in the style of an HTTP reason phrase
    pub fn status_text(&self) -> String {
        match self {
            Error::HttpStatus { status_text, .. } => status_text.clone(),
            Error::Timeout { .. } => "timeout".to_string(),
            Error::Http(e) if e.is_connect() => "connection error".to_string(),
            _ => "error".to_string(),
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for wprest-fetch
pub type Result<T> = std::result::Result<T, Error>;
