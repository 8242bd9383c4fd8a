//! Client error types.

use std::fmt;

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned a non-success status.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body as returned by the server.
        body: ErrorBody,
    },

    /// A tool or resource envelope had no content entry to decode.
    #[error("Response envelope has no content")]
    MissingContent,

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A string that names none of the known tools.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool '{0}'")]
pub struct ParseToolNameError(pub String);

impl Error {
    /// HTTP status of a failed response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server-provided error body, if any.
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            Error::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Api { status: 401 | 403, .. })
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::Api { status: 429, .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Body of a failed response.
///
/// The server answers errors with `{"error": ..., "message": ...}`, but
/// proxies in front of it may not, so unparseable bodies are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// Body parsed as JSON.
    Json(serde_json::Value),
    /// Raw response text.
    Text(String),
}

impl ErrorBody {
    pub(crate) fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(text),
        }
    }

    /// The server's short error label (`error` field).
    pub fn error(&self) -> Option<&str> {
        self.field("error")
    }

    /// The server's human-readable explanation (`message` field).
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    /// The JSON body, if it parsed.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ErrorBody::Json(value) => Some(value),
            ErrorBody::Text(_) => None,
        }
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.as_json()?.get(key)?.as_str()
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorBody::Json(value) => match (self.error(), self.message()) {
                (Some(error), Some(message)) => write!(f, "{}: {}", error, message),
                (Some(error), None) => f.write_str(error),
                (None, Some(message)) => f.write_str(message),
                (None, None) => write!(f, "{}", value),
            },
            ErrorBody::Text(text) if text.is_empty() => f.write_str("<empty body>"),
            ErrorBody::Text(text) => f.write_str(text),
        }
    }
}
