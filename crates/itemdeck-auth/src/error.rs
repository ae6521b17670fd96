//! Auth-specific error types.

/// Errors that can occur during authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header or bearer token present.
    #[error("missing authentication token")]
    MissingToken,

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token signature or format is invalid.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Password hashing or hash parsing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Token could not be signed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Whether this error should result in a 401 (vs. a 500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken | AuthError::Expired | AuthError::InvalidToken(_)
        )
    }

    /// Message safe to return to the client.
    pub fn detail(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Not authenticated",
            AuthError::Expired => "Token has expired",
            AuthError::InvalidToken(_) => "Invalid token",
            AuthError::Hashing(_) | AuthError::Signing(_) => "Authentication error",
        }
    }
}
