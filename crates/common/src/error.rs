//! Common error types and handling for the TeachPortal client

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the TeachPortal client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Session error: {0}")]
    Session(String),
}

impl Error {
    /// Whether this error came from a 401/403 response and cleared the session
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::Authorization(_))
    }

    /// Get the error code for log output
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Authentication(_) => "AUTHENTICATION_ERROR",
            Error::Authorization(_) => "AUTHORIZATION_ERROR",
            Error::Network(_) => "NETWORK_ERROR",
            Error::Server { .. } => "SERVER_ERROR",
            Error::Session(_) => "SESSION_ERROR",
        }
    }
}
