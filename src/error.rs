// src/error.rs

//! Unified error handling for the reports client.

use std::fmt;

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request or input failed validation before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// One or more documents could not be delivered
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Response arrived but did not have the expected shape
    #[error("Unexpected response from {context}: {message}")]
    Response { context: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a server error from a status code and message.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Create a delivery error.
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery(message.into())
    }

    /// Create an unexpected-response error with context.
    pub fn response(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Response {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Message suitable for showing in place of a result.
    ///
    /// Server errors surface the server's own message without the status prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_strips_status_for_server_errors() {
        let err = AppError::server(404, "no students found");
        assert_eq!(err.user_message(), "no students found");
        assert_eq!(err.to_string(), "Server error (404): no students found");
    }

    #[test]
    fn user_message_keeps_display_for_other_errors() {
        let err = AppError::validation("no students selected");
        assert_eq!(err.user_message(), "Validation error: no students selected");
    }
}
