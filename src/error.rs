//! Error types for the Baserow client
//!
//! Every public API returns `Result<T, Error>`. Three families are kept apart:
//! fail-fast local errors (configuration, validation), remote errors reported
//! by the API (`Api`), and responses that do not match the expected shape
//! (`Protocol`). Network failures are wrapped as `Transport`.

use thiserror::Error;

/// The main error type for the Baserow client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Field validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Schema lookup failed: {message}")]
    SchemaLookup { message: String },

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Protocol violation: {message}")]
    Protocol { message: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Reasons a proposed field descriptor is rejected before any request is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field #{index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("field #{index} is missing required key '{key}'")]
    MissingKey { index: usize, key: String },

    #[error("field #{index} has invalid field type '{field_type}'")]
    InvalidFieldType { index: usize, field_type: String },

    #[error("field #{index}: '{key}' must be {expected}")]
    WrongValueType {
        index: usize,
        key: String,
        expected: String,
    },
}

impl ValidationError {
    /// Index of the offending descriptor in the submitted batch
    pub fn index(&self) -> usize {
        match self {
            Self::NotAnObject { index }
            | Self::MissingKey { index, .. }
            | Self::InvalidFieldType { index, .. }
            | Self::WrongValueType { index, .. } => *index,
        }
    }
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

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an API error from a status and response body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a protocol violation error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create a schema lookup error
    pub fn schema_lookup(message: impl Into<String>) -> Self {
        Self::SchemaLookup {
            message: message.into(),
        }
    }

    /// HTTP status reported by the API, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) | Error::RateLimited { .. } => true,
            Error::Api { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the Baserow client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
