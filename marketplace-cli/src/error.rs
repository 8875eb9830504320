//! Error types for the marketplace CLI.

use marketplace_webhooks::NotifyError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Notification or client setup failed
    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// Input file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not a valid event
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Result could not be printed
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),

    /// Health probe failed
    #[error("Marketplace webhooks at {url} are not available")]
    Unhealthy { url: String },
}

impl CliError {
    /// Extra guidance printed after the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Unhealthy { .. } => Some(
                "Make sure the marketplace server is running:\n  cd marketplace/backend && npm start",
            ),
            _ => None,
        }
    }
}
