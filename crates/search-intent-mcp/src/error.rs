//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during MCP server operations
#[derive(Debug, Error)]
pub enum Error {
    /// The bearer credential was not supplied at startup
    #[error("SEARCH_INTENT_API_KEY environment variable is not set")]
    MissingApiKey,

    /// Invalid startup configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tool arguments did not match the input schema
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Unknown tool requested
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Failed to build the outbound HTTP client
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// JSON-RPC error code used when this error is reported to the caller
    pub fn rpc_code(&self) -> i32 {
        match self {
            Error::InvalidParams(_) | Error::UnknownTool(_) => crate::protocol::INVALID_PARAMS,
            _ => crate::protocol::INTERNAL_ERROR,
        }
    }
}
