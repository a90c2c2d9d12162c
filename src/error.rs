use std::io;
use thiserror::Error;

/// Failures raised by a metadata provider when the local schema cannot
/// answer a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// No collection with the requested name exists
    #[error("Collection not found: {0}")]
    NotFound(String),

    /// Schema state is missing or has not been loaded yet
    #[error("Schema unavailable: {0}")]
    Unavailable(String),

    /// The schema definition itself is malformed
    #[error("Invalid schema definition: {0}")]
    InvalidDefinition(String),
}

/// Failures raised by a remote executor. These are never recovered by the
/// facade, so the variant and message reach the caller as produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The endpoint could not be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// The endpoint answered with a non-success status
    #[error("Server error: HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The endpoint answered but reported operation errors
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response body was not the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// The executor was built from an unusable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            TransportError::Decode(error.to_string())
        } else {
            TransportError::Connection(error.to_string())
        }
    }
}

/// Failures while loading an [`AdminConfig`](crate::config::AdminConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Error type for every facade operation
#[derive(Debug, Error)]
pub enum AdminError {
    /// Local schema metadata could not answer
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The remote executor failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A remote response did not deserialize into the expected type
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be loaded or validated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Conversion from serde_json::Error to AdminError
impl From<serde_json::Error> for AdminError {
    fn from(error: serde_json::Error) -> Self {
        AdminError::Serialization(error.to_string())
    }
}

/// Result type alias for facade operations
pub type AdminResult<T> = Result<T, AdminError>;
