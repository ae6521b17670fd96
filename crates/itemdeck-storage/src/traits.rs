//! The store abstraction handlers are written against.

use async_trait::async_trait;
use itemdeck_core::{Item, ItemCreate, ItemPatch};

use crate::StoreResult;

/// Persistence for the item collection.
///
/// Lookups are by exact id match. Operations that target a single record
/// return `Ok(None)` when nothing matches; `Err` is reserved for the store
/// itself being unusable. Each mutation is applied atomically with respect
/// to other mutations on the same store.
#[async_trait]
pub trait ItemStore: Send + Sync + 'static {
    /// All items, in insertion order.
    async fn list(&self) -> StoreResult<Vec<Item>>;

    /// The item with `id`, if any.
    async fn find(&self, id: &str) -> StoreResult<Option<Item>>;

    /// Assign a fresh id to `item`, append it, and return the stored record.
    async fn insert(&self, item: ItemCreate) -> StoreResult<Item>;

    /// Merge the present fields of `patch` into the item with `id`.
    async fn update(&self, id: &str, patch: ItemPatch) -> StoreResult<Option<Item>>;

    /// Replace the name and description of the item with `id`.
    async fn replace(&self, id: &str, item: ItemCreate) -> StoreResult<Option<Item>>;

    /// Remove the item with `id` and return it.
    async fn delete(&self, id: &str) -> StoreResult<Option<Item>>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}
