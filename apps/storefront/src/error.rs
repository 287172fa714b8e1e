//! # Command Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin: "theme neon"                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  parse_command ── unknown verb ─────────► ApiError(UNKNOWN_COMMAND)     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  command fn ──── ClientError ───────────► ApiError(NOT_MOUNTED, ...)    │
//! │         │   └─── SessionError ──────────► ApiError(SESSION_ERROR)       │
//! │         ▼                                                               │
//! │  stdout: {"type":"error","code":"INVALID_ARGUMENT","message":"..."}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Command errors are reported and the loop keeps running; none of them
//! ends the process.

use serde::Serialize;
use thiserror::Error;
use trafalgar_client::{ClientError, SessionError};

/// Error reported for a failed command.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_ARGUMENT",
///   "message": "unknown theme 'neon'. Valid themes: light, dark, fresh"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The verb is not a known command
    UnknownCommand,

    /// The verb is known but its argument is not usable
    InvalidArgument,

    /// The storefront is not mounted (or was torn down)
    NotMounted,

    /// The session provider rejected a sign-in or sign-out
    SessionError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an unknown command error.
    pub fn unknown_command(verb: &str) -> Self {
        ApiError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command '{}'. Type 'help' for the list.", verb),
        )
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidArgument, message)
    }

    /// Creates a session error, keeping the provider's message verbatim.
    pub fn session(err: SessionError) -> Self {
        ApiError::new(ErrorCode::SessionError, err.to_string())
    }
}

/// Converts client errors to API errors.
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotMounted => ApiError::new(ErrorCode::NotMounted, err.to_string()),
            err if err.is_config_error() => ApiError::invalid_argument(err.to_string()),
            other => {
                tracing::error!(error = %other, "Command failed");
                ApiError::new(ErrorCode::Internal, other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization() {
        let err = ApiError::invalid_argument("bad theme");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"INVALID_ARGUMENT","message":"bad theme"}"#);
        assert_eq!(err.to_string(), "[InvalidArgument] bad theme");
    }

    #[test]
    fn test_client_error_conversion() {
        let err: ApiError = ClientError::NotMounted.into();
        assert_eq!(err.code, ErrorCode::NotMounted);

        let err: ApiError = ClientError::InvalidUrl("ftp://x".into()).into();
        assert_eq!(err.code, ErrorCode::InvalidArgument);

        let err: ApiError = ClientError::Internal("boom".into()).into();
        assert_eq!(err.code, ErrorCode::Internal);
    }

    #[test]
    fn test_session_error_message_is_verbatim() {
        let err = ApiError::session("identity provider unavailable".into());
        assert_eq!(err.code, ErrorCode::SessionError);
        assert_eq!(err.message, "identity provider unavailable");
    }
}
