//! Itemdeck Core: shared types, identifiers, errors, and record helpers.
//!
//! This crate has no internal itemdeck dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`ids`]: Identifier generation and format validation
//! - [`model`]: Item request/response models
//! - [`normalize`]: Record shape normalization

pub mod error;
pub mod ids;
pub mod model;
pub mod normalize;

#[cfg(test)]
mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use ids::{ItemId, generate_identifier, is_valid_identifier};
pub use model::{ErrorBody, Item, ItemCreate, ItemPatch};
pub use normalize::normalize_record;
