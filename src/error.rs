//! Error types for the render gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to a rendering backend
///
/// Malformed request input is not represented here: see
/// [`crate::validate::ValidationFailure`].
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to initialize a backend
    #[error("Gateway initialization failed: {0}")]
    InitializationError(String),

    /// The engine rejected or failed the render
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Operation timed out
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Network error while reaching the engine
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
