//! Error types for marketplace webhook operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while notifying the marketplace
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The request never produced a successful response: timeout, refused
    /// connection, DNS failure or a non-2xx status.
    #[error("Webhook failed: {endpoint}: {message}{}", body_suffix(.body))]
    Transport {
        /// Webhook endpoint name, e.g. `book-generated`
        endpoint: String,
        /// Underlying error description
        message: String,
        /// Raw response text, when a response was received
        body: Option<String>,
    },

    /// The marketplace answered with a success status but the body was not
    /// the expected JSON.
    #[error("Invalid response from {endpoint}: {message}")]
    Decode {
        /// Webhook endpoint name
        endpoint: String,
        /// Parser error description
        message: String,
    },

    /// An attachment exists but could not be read
    #[error("Failed to read attachment {}: {source}", .path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An attachment is larger than the configured ceiling
    #[error("Attachment {} is {size} bytes (limit: {limit})", .path.display())]
    AttachmentTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NotifyError {
    pub(crate) fn transport(
        endpoint: impl Into<String>,
        message: impl Into<String>,
        body: Option<String>,
    ) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
            body,
        }
    }

    pub(crate) fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Check if this is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a response decoding failure
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Endpoint name for dispatch errors
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Transport { endpoint, .. } | Self::Decode { endpoint, .. } => Some(endpoint),
            _ => None,
        }
    }

    /// Raw response text attached to a transport error
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Transport { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(text) if !text.is_empty() => format!(" (response: {})", text),
        _ => String::new(),
    }
}
