//! Password hashing with bcrypt.
//!
//! Each hash embeds its own random salt and cost factor, so hashing the same
//! password twice yields different strings that both verify.

use crate::AuthError;

/// bcrypt hasher with a configurable cost factor.
#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with bcrypt's default cost.
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a hasher with an explicit cost (4..=31).
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Cost factor used for new hashes.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash `plain` with a fresh salt.
    pub fn hash(&self, plain: &str) -> Result<String, AuthError> {
        bcrypt::hash(plain, self.cost).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Check `plain` against a stored hash.
    ///
    /// Returns `Ok(false)` for a wrong password and `Err` when `hashed` is not
    /// a bcrypt hash at all.
    pub fn verify(&self, plain: &str, hashed: &str) -> Result<bool, AuthError> {
        bcrypt::verify(plain, hashed).map_err(|e| AuthError::Hashing(e.to_string()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a password with the default cost.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    PasswordHasher::new().hash(plain)
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, AuthError> {
    PasswordHasher::new().verify(plain, hashed)
}
