//! Error types for the NowCerts MCP server.

use std::path::PathBuf;

use thiserror::Error;

use nowcerts_client::ClientError;

/// Errors that stop the server from starting or serving.
///
/// Tool calls never produce these; their failures are returned to the agent
/// as text.
#[derive(Debug, Error)]
pub enum ServerError {
    /// I/O error reading the configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// No API key in the configuration file or environment.
    #[error("Missing API key: set NOWCERTS_API_KEY or [api] api_key")]
    MissingApiKey,

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be built.
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// MCP transport failure.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias using `ServerError`.
pub type Result<T> = std::result::Result<T, ServerError>;
