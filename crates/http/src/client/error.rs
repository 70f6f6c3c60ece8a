//! Client error types

use super::envelope::FALLBACK_MESSAGE;
use cockpit_core::CoreError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Response arrived but its envelope code was not the success code
    #[error("{message}")]
    Rejected { code: Option<i64>, message: String },

    /// Server answered with a non-2xx HTTP status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// No response: connection failure, timeout or a broken body
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Payload did not match the expected type
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Durable session storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] CoreError),
}

impl ClientError {
    /// Message shown to the user for this error
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } | Self::Status { message, .. } => message.clone(),
            Self::Request(err) => {
                let text = err.to_string();
                if text.is_empty() {
                    FALLBACK_MESSAGE.to_string()
                } else {
                    text
                }
            }
            other => other.to_string(),
        }
    }

    /// Transport gave up after the configured timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(err) if err.is_timeout())
    }

    /// Backend refused the credential at either the HTTP or envelope layer
    pub const fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::Status { status: 401, .. } | Self::Rejected { code: Some(401), .. }
        )
    }
}
