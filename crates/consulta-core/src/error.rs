//! Error types for the Consulta client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole client.
///
/// This provides typed, structured error variants with string-captured
/// sources so the type stays `Clone` and serializable across process
/// boundaries (event channels, logs).
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ConsultaError {
    /// Network-level failure: the agent endpoint could not be reached
    /// or the connection broke mid-request.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The agent endpoint answered with a non-success HTTP status.
    /// The body is kept for diagnostics only and is never shown to the user.
    #[error("agent endpoint returned HTTP {status}")]
    Status { status: u16, body: String },

    /// The agent answered 2xx but flagged the reply as an error.
    #[error("agent reported an error: {message}")]
    Application { message: String },

    /// The response body did not match the expected shape.
    #[error("malformed agent response: {0}")]
    InvalidResponse(String),

    /// The request exceeded the configured deadline.
    #[error("agent did not answer within {seconds}s")]
    Timeout { seconds: u64 },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ConsultaError>;

impl ConsultaError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates an Application error
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
        }
    }

    /// Creates an InvalidResponse error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Creates a Timeout error
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is an Application error
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }

    /// Check if this is a Timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if this is a Config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let err = ConsultaError::transport("connection refused");
        assert_eq!(err.to_string(), "transport error: connection refused");

        let err = ConsultaError::status(500, "Internal Server Error");
        assert_eq!(err.to_string(), "agent endpoint returned HTTP 500");

        let err = ConsultaError::timeout(30);
        assert_eq!(err.to_string(), "agent did not answer within 30s");
    }

    #[test]
    fn test_predicates() {
        assert!(ConsultaError::transport("x").is_transport());
        assert!(ConsultaError::application("x").is_application());
        assert!(ConsultaError::timeout(1).is_timeout());
        assert!(ConsultaError::config("x").is_config());
        assert!(!ConsultaError::status(404, "").is_application());
    }

    #[test]
    fn test_status_keeps_body_for_diagnostics() {
        let err = ConsultaError::status(502, "upstream exploded");
        match err {
            ConsultaError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream exploded");
            }
            _ => panic!("expected Status variant"),
        }
    }
}
