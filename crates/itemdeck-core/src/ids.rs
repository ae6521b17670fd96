//! Item identifier generation and validation.
//!
//! Identifiers are 24 hexadecimal characters, the shape of a document-database
//! object id. The generator and the validator agree on that shape, so every
//! id the store hands out can be addressed through the HTTP routes.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Number of hex characters in an identifier.
pub const IDENTIFIER_LEN: usize = 24;

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-fA-F0-9]{24}$").unwrap_or_else(|_| unreachable!("static pattern"))
});

/// Check whether `s` has the identifier format.
///
/// Only the format is checked; a valid identifier may still not exist.
///
/// # Examples
///
/// ```
/// use itemdeck_core::is_valid_identifier;
///
/// assert!(is_valid_identifier("65f1a2b3c4d5e6f708192a3b"));
/// assert!(!is_valid_identifier("1"));
/// assert!(!is_valid_identifier("65f1a2b3c4d5e6f708192a3g"));
/// ```
pub fn is_valid_identifier(s: &str) -> bool {
    IDENTIFIER_RE.is_match(s)
}

/// Generate a fresh lowercase identifier from 12 random bytes.
pub fn generate_identifier() -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(IDENTIFIER_LEN);
    hex
}

/// A validated item identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Parse and validate an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when `s` is not 24 hex characters.
    pub fn parse(s: &str) -> Result<Self> {
        if is_valid_identifier(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::validation_field(
                "item_id",
                "Invalid item_id format.",
            ))
        }
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
