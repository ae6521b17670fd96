//! HS256 token issuance and verification.
//!
//! Tokens carry the whole user object in a `user` claim. Verification checks
//! only the signature and `exp`; the embedded user is returned verbatim and
//! never re-fetched, so it can be stale for the lifetime of the token.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AuthError, AuthenticatedUser, TokenValidator};

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 2;

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
    /// Arbitrary user object.
    pub user: Value,
}

/// Signs and verifies HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDelta,
}

impl JwtAuth {
    /// Create a signer/verifier for `secret` with the default lifetime.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: TimeDelta::days(DEFAULT_TOKEN_TTL_DAYS),
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    /// Token lifetime.
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Issue a token for `user`, valid from now.
    pub fn issue_token(&self, user: Value) -> Result<String, AuthError> {
        self.issue_token_at(user, Utc::now())
    }

    /// Issue a token for `user` as if it were `issued_at`.
    pub fn issue_token_at(&self, user: Value, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            exp: (issued_at + self.ttl).timestamp(),
            iat: issued_at.timestamp(),
            user,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Decode and check a token, returning all of its claims.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }

    /// Verify a token and return the embedded user object.
    ///
    /// # Errors
    ///
    /// [`AuthError::Expired`] once `exp` has passed, [`AuthError::InvalidToken`]
    /// for a bad signature or a malformed token.
    pub fn verify_token(&self, token: &str) -> Result<Value, AuthError> {
        self.decode_claims(token).map(|claims| claims.user)
    }
}

impl TokenValidator for JwtAuth {
    fn validate(
        &self,
        token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>> {
        let result = self.verify_token(token).map(AuthenticatedUser::new);
        Box::pin(async move { result })
    }
}
