//! Error types for server startup and operation.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind the listening socket.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The accept/serve loop failed.
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging init failed: {0}")]
    Logging(String),
}
