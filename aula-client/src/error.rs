//! Client error types

use thiserror::Error;

/// Errors surfaced by the HTTP client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required; stored credentials have been cleared
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by server-side validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Structured error response from the center API
    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    /// Credential storage failure
    #[error("Credential storage error: {0}")]
    Credential(#[from] crate::credentials::CredentialError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// The server-provided message, or `default` when the error carries none
    ///
    /// Used by the console to fill write-path error notifications.
    pub fn server_message(&self, default: &str) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => default.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
