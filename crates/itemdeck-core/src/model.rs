//! Item request and response models.
//!
//! `ItemCreate` carries the fields a client supplies on create and full
//! replacement. `Item` is a stored record and always has an id. `ItemPatch`
//! names only the fields a partial update touches.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a create (POST) or full-replacement (PUT) request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCreate {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

impl ItemCreate {
    /// Creates a new request body.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Body of a partial-update (PATCH) request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    /// New name, if it should change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description, if it should change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ItemPatch {
    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

impl From<ItemCreate> for ItemPatch {
    fn from(create: ItemCreate) -> Self {
        Self {
            name: Some(create.name),
            description: Some(create.description),
        }
    }
}

/// A stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier assigned by the store.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Any other keys the stored record carries, kept through rewrites.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Build a stored record from a create body and an assigned id.
    pub fn from_create(id: impl Into<String>, create: ItemCreate) -> Self {
        Self {
            id: id.into(),
            name: create.name,
            description: create.description,
            extra: Map::new(),
        }
    }

    /// Shallow-merge the present fields of `patch`; absent fields are kept.
    pub fn apply_patch(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }

    /// Replace every client-owned field, keeping the id and any extra keys.
    pub fn replace_with(&mut self, create: ItemCreate) {
        self.name = create.name;
        self.description = create.description;
    }
}

/// Body of every error response: `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description of what went wrong.
    pub detail: String,
}

impl ErrorBody {
    /// Creates a new error body.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
