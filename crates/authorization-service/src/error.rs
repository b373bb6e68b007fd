//! Error types for the authorization service.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Protocol errors surfaced to the HTTP caller.
///
/// Each variant maps to one OAuth error code. The detail string is for logs
/// only; the response body carries the code alone.
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    /// Malformed or missing parameters, or no pending authorization.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown or deleted client.
    #[error("Invalid client: {0}")]
    InvalidClient(String),

    /// Randomness or backing-store failure.
    #[error("Server error: {0}")]
    Server(String),
}

impl AuthError {
    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an invalid client error.
    #[must_use]
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::InvalidClient(message.into())
    }

    /// Create a server error.
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// OAuth error code for the response body.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::InvalidClient(_) => "invalid_client",
            Self::Server(_) => "server_error",
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidClient(_) => StatusCode::BAD_REQUEST,
            Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            Self::Server(detail) => tracing::error!(error = self.code(), %detail, "Request failed"),
            Self::InvalidRequest(detail) | Self::InvalidClient(detail) => {
                tracing::debug!(error = self.code(), %detail, "Request rejected");
            }
        }

        (self.status(), Json(serde_json::json!({ "error": self.code() }))).into_response()
    }
}

/// Errors from the client directory.
#[derive(thiserror::Error, Debug)]
pub enum DirectoryError {
    /// No active client with this identifier.
    #[error("Client not found: {identifier}")]
    NotFound {
        /// Identifier that was looked up
        identifier: String,
    },

    /// Another client already uses this name.
    #[error("Client name already registered: {name}")]
    Conflict {
        /// Conflicting client name
        name: String,
    },

    /// Backing store could not be reached.
    #[error("Client directory unavailable: {0}")]
    Unavailable(String),

    /// Registry file could not be read.
    #[error("Failed to read client registry: {0}")]
    Io(#[from] std::io::Error),

    /// Registry file is not valid JSON.
    #[error("Failed to parse client registry: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DirectoryError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound { identifier: identifier.into() }
    }

    /// Returns true if the client simply does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        if err.is_not_found() {
            Self::InvalidClient(err.to_string())
        } else {
            Self::Server(err.to_string())
        }
    }
}

/// The secure random source could not produce bytes.
#[derive(thiserror::Error, Debug)]
#[error("Secure random source unavailable: {0}")]
pub struct RandomUnavailable(pub String);

impl From<RandomUnavailable> for AuthError {
    fn from(err: RandomUnavailable) -> Self {
        Self::Server(err.to_string())
    }
}

/// Result type alias for request handling.
pub type AuthResult<T> = Result<T, AuthError>;
