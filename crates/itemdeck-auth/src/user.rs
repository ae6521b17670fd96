//! Authenticated user identity and extraction helpers.

use serde_json::Value;

/// An authenticated user identity, extracted from a validated token.
///
/// Stored in HTTP request extensions by the auth middleware. The user object
/// is whatever was embedded at issuance time.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    /// The user object carried in the token.
    pub user: Value,
}

impl AuthenticatedUser {
    /// Wrap a decoded user object.
    pub fn new(user: Value) -> Self {
        Self { user }
    }

    /// The `sub` field of the user object, if it is a string.
    pub fn subject(&self) -> Option<&str> {
        self.user.get("sub").and_then(Value::as_str)
    }
}

/// Extract the `AuthenticatedUser` from HTTP request `Parts`, if present.
pub fn user_from_parts(parts: &http::request::Parts) -> Option<&AuthenticatedUser> {
    parts.extensions.get::<AuthenticatedUser>()
}
