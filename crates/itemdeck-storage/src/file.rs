//! JSON-file item store.
//!
//! The whole dataset lives in one pretty-printed JSON document:
//!
//! ```json
//! {
//!     "items": [
//!         {"id": "507f1f77bcf86cd799439011", "name": "Lamp", "description": "A desk lamp"}
//!     ]
//! }
//! ```
//!
//! Every call reloads the file, so the file is the only source of truth and
//! edits made by hand between requests are picked up. Mutations hold an async
//! mutex for the whole read-modify-write cycle and replace the file by
//! writing a sibling temporary file and renaming it into place.
//!
//! Records written by a document-database export, keyed by `_id` instead of
//! `id`, are normalized on load and saved back in the public shape.
//!
//! Keys a record carries beyond `id`, `name` and `description` are kept
//! through every rewrite.
//!
//! A missing file is an empty store. A file that exists but cannot be read or
//! parsed is an error, never an empty result. The check covers the whole
//! file: one malformed record fails every call, and the error names that
//! record's index.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use itemdeck_core::{Item, ItemCreate, ItemPatch, generate_identifier, normalize_record};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::traits::ItemStore;

/// On-disk dataset document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Stored items, in insertion order.
    #[serde(default)]
    pub items: Vec<Item>,

    /// Top-level keys other than `items`, kept verbatim across rewrites.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Dataset {
    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Serialize with four-space indentation.
    pub fn to_pretty_json(&self) -> StoreResult<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(buf)
    }
}

/// Item store backed by a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store over `path`. The file is not touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dataset from disk.
    ///
    /// Returns an empty dataset if the file does not exist or holds only
    /// whitespace.
    pub async fn load(&self) -> StoreResult<Dataset> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} does not exist, treating as empty", self.path.display());
                return Ok(Dataset::default());
            }
            Err(e) => return Err(StoreError::io_with_path(e, &self.path)),
        };

        if content.trim().is_empty() {
            return Ok(Dataset::default());
        }

        let raw: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| StoreError::corrupt(&self.path, e.to_string()))?;
        let serde_json::Value::Object(mut extra) = raw else {
            return Err(StoreError::corrupt(&self.path, "expected a JSON object"));
        };

        let records = match extra.remove("items") {
            None => Vec::new(),
            Some(serde_json::Value::Array(records)) => records,
            Some(_) => {
                return Err(StoreError::corrupt(&self.path, "`items` must be an array"));
            }
        };
        let items = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value::<Item>(normalize_record(record))
                    .map_err(|e| StoreError::corrupt(&self.path, format!("item {index}: {e}")))
            })
            .collect::<StoreResult<Vec<_>>>()?;

        let dataset = Dataset { items, extra };
        log::debug!(
            "Read {} items from {}",
            dataset.items.len(),
            self.path.display()
        );
        Ok(dataset)
    }

    /// Write the dataset to disk, replacing the file atomically.
    pub async fn save(&self, dataset: &Dataset) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io_with_path(e, parent))?;
        }

        let content = dataset.to_pretty_json()?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &content)
            .await
            .map_err(|e| StoreError::io_with_path(e, &tmp))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::io_with_path(e, &self.path))?;

        log::debug!(
            "Wrote {} items to {}",
            dataset.items.len(),
            self.path.display()
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data.json".to_string());
        self.path.with_file_name(format!(".{file_name}.tmp"))
    }

    /// Run `f` over the loaded dataset under the write lock, saving only
    /// when it returns `Some`.
    async fn mutate<T, F>(&self, f: F) -> StoreResult<Option<T>>
    where
        F: FnOnce(&mut Dataset) -> Option<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut dataset = self.load().await?;
        let outcome = f(&mut dataset);
        if outcome.is_some() {
            self.save(&dataset).await?;
        }
        Ok(outcome)
    }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    async fn list(&self) -> StoreResult<Vec<Item>> {
        Ok(self.load().await?.items)
    }

    async fn find(&self, id: &str) -> StoreResult<Option<Item>> {
        let dataset = self.load().await?;
        Ok(dataset.items.into_iter().find(|item| item.id == id))
    }

    async fn insert(&self, item: ItemCreate) -> StoreResult<Item> {
        let _guard = self.write_lock.lock().await;
        let mut dataset = self.load().await?;

        let mut id = generate_identifier();
        while dataset.position(&id).is_some() {
            id = generate_identifier();
        }
        let record = Item::from_create(id, item);
        dataset.items.push(record.clone());

        self.save(&dataset).await?;
        Ok(record)
    }

    async fn update(&self, id: &str, patch: ItemPatch) -> StoreResult<Option<Item>> {
        self.mutate(|dataset| {
            let index = dataset.position(id)?;
            let record = &mut dataset.items[index];
            record.apply_patch(patch);
            Some(record.clone())
        })
        .await
    }

    async fn replace(&self, id: &str, item: ItemCreate) -> StoreResult<Option<Item>> {
        self.mutate(|dataset| {
            let index = dataset.position(id)?;
            let record = &mut dataset.items[index];
            record.replace_with(item);
            Some(record.clone())
        })
        .await
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<Item>> {
        self.mutate(|dataset| {
            let index = dataset.position(id)?;
            Some(dataset.items.remove(index))
        })
        .await
    }

    fn name(&self) -> &str {
        "json-file"
    }
}
