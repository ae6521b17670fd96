//! Authentication primitives for itemdeck.
//!
//! Provides:
//! - [`PasswordHasher`] / [`hash_password`] / [`verify_password`]: bcrypt hashing
//! - [`JwtAuth`]: HS256 token issuance and verification with a 2-day lifetime
//! - [`AuthenticatedUser`]: Identity extracted from a validated token
//! - [`TokenValidator`]: Trait for async token validation
//! - [`AuthLayer`] / [`AuthService`]: Tower guard driven by an [`AccessPolicy`]
//! - [`AuthError`]: Auth-specific error types

mod error;
mod jwt;
mod middleware;
mod password;
mod user;

pub use error::AuthError;
pub use jwt::{Claims, DEFAULT_TOKEN_TTL_DAYS, JwtAuth};
pub use middleware::{AuthLayer, AuthService};
pub use password::{PasswordHasher, hash_password, verify_password};
pub use user::{AuthenticatedUser, user_from_parts};

/// Class of request, as far as the guard is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Safe methods: GET, HEAD, OPTIONS.
    Read,
    /// Everything that may change state.
    Write,
}

impl Access {
    /// Classify an HTTP method.
    pub fn from_method(method: &http::Method) -> Self {
        match *method {
            http::Method::GET | http::Method::HEAD | http::Method::OPTIONS => Access::Read,
            _ => Access::Write,
        }
    }
}

/// Which request classes need a bearer token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Token required for reads.
    pub read_requires_token: bool,
    /// Token required for writes.
    pub write_requires_token: bool,
}

impl AccessPolicy {
    /// Reads are public, writes need a token.
    pub const PROTECT_WRITES: Self = Self {
        read_requires_token: false,
        write_requires_token: true,
    };

    /// Every request needs a token.
    pub const PROTECT_ALL: Self = Self {
        read_requires_token: true,
        write_requires_token: true,
    };

    /// Whether a request of class `access` must present a token.
    pub fn requires_token(&self, access: Access) -> bool {
        match access {
            Access::Read => self.read_requires_token,
            Access::Write => self.write_requires_token,
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::PROTECT_WRITES
    }
}

/// Configuration for the auth middleware.
#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
    /// Whether authentication is enabled. When false, all requests pass through.
    pub enabled: bool,
    /// Which requests need a token when enabled.
    pub policy: AccessPolicy,
}

/// Trait for validating tokens and extracting user identity.
///
/// The middleware calls `validate()` with the bearer token and returns
/// the authenticated user on success.
pub trait TokenValidator: Send + Sync + 'static {
    /// Validate a token and return the authenticated user.
    fn validate(
        &self,
        token: &str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>,
    >;
}
