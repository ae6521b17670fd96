//! In-memory item store.

use async_trait::async_trait;
use itemdeck_core::{Item, ItemCreate, ItemPatch, generate_identifier};
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::traits::ItemStore;

/// Item store that keeps everything in process memory.
///
/// Never fails; the `Result` return types exist only to satisfy
/// [`ItemStore`].
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Item>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `items`.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        Ok(self.items.read().await.clone())
    }

    async fn find(&self, id: &str) -> StoreResult<Option<Item>> {
        Ok(self.items.read().await.iter().find(|i| i.id == id).cloned())
    }

    async fn insert(&self, item: ItemCreate) -> StoreResult<Item> {
        let mut items = self.items.write().await;
        let mut id = generate_identifier();
        while items.iter().any(|i| i.id == id) {
            id = generate_identifier();
        }
        let record = Item::from_create(id, item);
        items.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, patch: ItemPatch) -> StoreResult<Option<Item>> {
        let mut items = self.items.write().await;
        Ok(items.iter_mut().find(|i| i.id == id).map(|record| {
            record.apply_patch(patch);
            record.clone()
        }))
    }

    async fn replace(&self, id: &str, item: ItemCreate) -> StoreResult<Option<Item>> {
        let mut items = self.items.write().await;
        Ok(items.iter_mut().find(|i| i.id == id).map(|record| {
            record.replace_with(item);
            record.clone()
        }))
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<Item>> {
        let mut items = self.items.write().await;
        let index = items.iter().position(|i| i.id == id);
        Ok(index.map(|index| items.remove(index)))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
