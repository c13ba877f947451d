//! Error types for the impact dashboard.
//!
//! Uses `thiserror` for structured error handling with automatic `From`
//! implementations. The loader's four-bucket failure taxonomy lives in
//! [`LoadError`]; the raw HTTP layer reports through [`ClientError`].

use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credential rejected by the API (401/403 response)
    #[error("Authentication rejected: {message}")]
    Unauthorized {
        /// Error message from API
        message: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Rate limited by the API (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    /// Create an unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized { message: message.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if this error is a credential rejection.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns true if this error is a transport-level failure
    /// (connection refused, DNS, timeout).
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

/// Errors from the data loader, classified for the operator.
///
/// The buckets mirror the user-facing taxonomy: a local precondition
/// failure, a credential rejection, a connectivity failure, or anything
/// else. Classification prefers structured signals from [`ClientError`]
/// and falls back to message inspection only for opaque transport errors.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// Credential was blank or whitespace; rejected before any I/O.
    #[error("API key is blank")]
    BlankCredential,

    /// The API rejected the credential.
    #[error("Authentication failed: {message}")]
    Auth {
        /// Underlying error message
        message: String,
    },

    /// Network-level failure reaching the API.
    #[error("Connection failed: {message}")]
    Connectivity {
        /// Underlying error message
        message: String,
    },

    /// Anything else.
    #[error("Load failed: {message}")]
    Other {
        /// Underlying error message
        message: String,
    },
}

impl LoadError {
    /// Convert to the operator-facing message shown by the dashboard.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::BlankCredential => {
                "Please enter your Dimensions API key to load data.".to_string()
            }
            Self::Auth { .. } => "Authentication failed. Please check your API key.".to_string(),
            Self::Connectivity { .. } => {
                "Connection error. Please check your internet connection.".to_string()
            }
            Self::Other { message } => format!("Error loading data: {message}"),
        }
    }

    /// Short tag for logs and API payloads.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BlankCredential => "blank_credential",
            Self::Auth { .. } => "auth",
            Self::Connectivity { .. } => "connectivity",
            Self::Other { .. } => "other",
        }
    }
}

impl From<ClientError> for LoadError {
    fn from(err: ClientError) -> Self {
        if err.is_auth() {
            return Self::Auth { message: err.to_string() };
        }
        if err.is_connectivity() {
            return Self::Connectivity { message: err.to_string() };
        }

        // Opaque transport or status errors carry no structured signal;
        // classify by message as a last resort.
        let message = err.to_string();
        let lower = message.to_lowercase();
        if lower.contains("authentication") || lower.contains("unauthorized") {
            Self::Auth { message }
        } else if lower.contains("connection") || lower.contains("timeout") {
            Self::Connectivity { message }
        } else {
            Self::Other { message }
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_predicates() {
        assert!(ClientError::unauthorized("bad key").is_auth());
        assert!(!ClientError::unauthorized("bad key").is_connectivity());
        assert!(!ClientError::bad_request("invalid query").is_auth());
        assert!(!ClientError::server(500, "boom").is_connectivity());
    }

    #[test]
    fn test_load_error_from_unauthorized() {
        let err = LoadError::from(ClientError::unauthorized("key expired"));
        assert!(matches!(err, LoadError::Auth { .. }));
        assert_eq!(err.kind(), "auth");
    }

    #[test]
    fn test_load_error_message_fallback() {
        let err = LoadError::from(ClientError::server(502, "upstream connection reset"));
        assert!(matches!(err, LoadError::Connectivity { .. }));

        let err = LoadError::from(ClientError::UnexpectedStatus {
            status: 418,
            message: "authentication token malformed".to_string(),
        });
        assert!(matches!(err, LoadError::Auth { .. }));

        let err = LoadError::from(ClientError::server(500, "boom"));
        assert!(matches!(err, LoadError::Other { .. }));
    }

    #[test]
    fn test_user_messages() {
        assert!(LoadError::BlankCredential.to_user_message().contains("API key"));
        let auth = LoadError::Auth { message: "401".to_string() };
        assert!(auth.to_user_message().contains("Authentication failed"));
        let conn = LoadError::Connectivity { message: "refused".to_string() };
        assert!(conn.to_user_message().contains("Connection error"));
    }
}
