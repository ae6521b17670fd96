//! # itemdeck-storage
//!
//! Storage back-ends for items.
//!
//! - [`ItemStore`]: the trait handlers depend on
//! - [`JsonFileStore`]: whole-file JSON dataset, reloaded on every call
//! - [`MemoryStore`]: in-process store for tests and ephemeral runs

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::{Dataset, JsonFileStore};
pub use memory::MemoryStore;
pub use traits::ItemStore;
