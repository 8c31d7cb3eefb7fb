/*
[INPUT]:  Error sources (HTTP transport, API payloads, serialization, URLs)
[OUTPUT]: Structured error types with user-facing display mapping
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Error payload text the backend uses to signal an expired session.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session has expired";

/// Message shown inline for transport and parse failures.
const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Main error type for the syncer console API client
#[derive(Error, Debug)]
pub enum SyncerError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error payload
    #[error("API error: {message}")]
    Api { message: String },

    /// Backend session cookie is no longer valid
    #[error("session has expired, login required")]
    SessionExpired,

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SyncerError {
    /// Map an error payload message from the backend onto an error variant.
    ///
    /// The session-expiry message is a control signal, not a display string,
    /// so it gets its own variant.
    pub fn from_api_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message == SESSION_EXPIRED_MESSAGE {
            SyncerError::SessionExpired
        } else {
            SyncerError::Api { message }
        }
    }

    /// Check if the error requires a login handoff instead of inline display
    pub fn is_session_expired(&self) -> bool {
        matches!(self, SyncerError::SessionExpired)
    }

    /// The string rendered inline in the console for this error.
    ///
    /// API payload messages pass through verbatim; every transport or parse
    /// failure collapses to the generic internal-error message.
    pub fn user_message(&self) -> String {
        match self {
            SyncerError::Api { message } => message.clone(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Result type alias for syncer console API operations
pub type Result<T> = std::result::Result<T, SyncerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_api_message_session_expired() {
        let err = SyncerError::from_api_message("Session has expired");
        assert!(err.is_session_expired());
    }

    #[test]
    fn test_from_api_message_plain_error() {
        let err = SyncerError::from_api_message("db account not found");
        match err {
            SyncerError::Api { message } => assert_eq!(message, "db account not found"),
            _ => panic!("Expected Api error variant"),
        }
        assert!(!SyncerError::from_api_message("db account not found").is_session_expired());
    }

    #[test]
    fn test_user_message_passthrough_and_generic() {
        let api = SyncerError::Api {
            message: "syntax error in query".to_string(),
        };
        assert_eq!(api.user_message(), "syntax error in query");

        let parse = SyncerError::InvalidResponse("missing account".to_string());
        assert_eq!(parse.user_message(), "Internal Server Error");
    }
}
