//! Error handling for EventicHub
//!
//! This module defines the main error types used throughout the application.
//! Errors reported by the hosted backend are carried verbatim so the console
//! can show exactly what the remote service said.

use serde::Deserialize;
use thiserror::Error;

/// Main error type for EventicHub
#[derive(Error, Debug)]
pub enum EventicHubError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Error body returned by the remote data API.
///
/// Fields mirror the JSON error object of the REST gateway; `status` is the
/// HTTP status the body arrived with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
}

/// Error body returned by the remote authentication API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawBackendError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

// The auth API has answered with several error shapes over its versions.
#[derive(Debug, Default, Deserialize)]
struct RawAuthError {
    error: Option<String>,
    error_code: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl BackendError {
    /// Build from a non-success response body
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<RawBackendError>(body) {
            Ok(raw) => Self {
                status,
                code: raw.code,
                message: raw.message.unwrap_or_else(|| fallback_message(status, body)),
                details: raw.details,
                hint: raw.hint,
            },
            Err(_) => Self {
                status,
                code: None,
                message: fallback_message(status, body),
                details: None,
                hint: None,
            },
        }
    }
}

impl AuthError {
    /// Build from a non-success response body
    pub fn from_body(status: u16, body: &str) -> Self {
        let raw = serde_json::from_str::<RawAuthError>(body).unwrap_or_default();

        let message = raw
            .msg
            .or(raw.error_description)
            .or(raw.message)
            .or_else(|| raw.error.clone())
            .unwrap_or_else(|| fallback_message(status, body));

        Self {
            status,
            code: raw.error_code.or(raw.error),
            message,
        }
    }

    /// Local error that never reached the remote service
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            code: None,
            message: message.into(),
        }
    }
}

fn fallback_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}

/// Result type alias for EventicHub operations
pub type Result<T> = std::result::Result<T, EventicHubError>;

impl EventicHubError {
    /// Message shown to the user.
    ///
    /// Remote errors are shown exactly as the backend phrased them.
    pub fn display_message(&self) -> String {
        match self {
            EventicHubError::Backend(e) => e.message.clone(),
            EventicHubError::Auth(e) => e.message.clone(),
            EventicHubError::NotAuthenticated(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_from_rest_body() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        let error = BackendError::from_body(406, body);

        assert_eq!(error.status, 406);
        assert_eq!(error.code.as_deref(), Some("PGRST116"));
        assert_eq!(error.details.as_deref(), Some("The result contains 0 rows"));
        assert!(error.hint.is_none());
        assert_eq!(error.to_string(), "JSON object requested, multiple (or no) rows returned");
    }

    #[test]
    fn test_backend_error_from_plain_text() {
        let error = BackendError::from_body(502, "Bad Gateway");
        assert_eq!(error.message, "Bad Gateway");
        assert!(error.code.is_none());

        let empty = BackendError::from_body(500, "");
        assert_eq!(empty.message, "HTTP 500");
    }

    #[test]
    fn test_auth_error_shapes() {
        let legacy = AuthError::from_body(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(legacy.message, "Invalid login credentials");
        assert_eq!(legacy.code.as_deref(), Some("invalid_grant"));

        let current = AuthError::from_body(
            400,
            r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#,
        );
        assert_eq!(current.message, "Invalid login credentials");
        assert_eq!(current.code.as_deref(), Some("invalid_credentials"));

        let gateway = AuthError::from_body(401, r#"{"message":"Invalid API key"}"#);
        assert_eq!(gateway.message, "Invalid API key");
    }

    #[test]
    fn test_display_message_is_verbatim() {
        let error: EventicHubError = AuthError::from_body(
            422,
            r#"{"msg":"User already registered"}"#,
        )
        .into();

        assert_eq!(error.display_message(), "User already registered");
        assert_eq!(error.to_string(), "Authentication error: User already registered");
    }
}
