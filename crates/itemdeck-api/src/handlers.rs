//! Item route handlers.
//!
//! Each handler runs the same sequence: spend one unit of the caller's
//! budget for the route, check the id format, decode the body, then call
//! the store and map the outcome.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use http::StatusCode;
use itemdeck_core::{Item, ItemCreate, ItemId, ItemPatch};
use itemdeck_storage::StoreError;

use crate::error::ApiError;
use crate::rate_limit::ClientKey;
use crate::state::AppState;

/// Logs a store failure and returns the route's generic 500.
fn internal(route: &'static str, detail: &'static str, err: StoreError) -> ApiError {
    tracing::error!(severity = "critical", route, error = %err, "{detail}");
    ApiError::Internal(detail)
}

fn parse_id(route: &'static str, item_id: &str) -> Result<ItemId, ApiError> {
    ItemId::parse(item_id).map_err(|_| {
        tracing::warn!(route, item_id, "rejected malformed item id");
        ApiError::invalid_id()
    })
}

/// `POST /items/`
pub async fn create_item(
    State(state): State<AppState>,
    client: ClientKey,
    body: Result<Json<ItemCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    const ROUTE: &str = "create_item";
    state.limiter.check(ROUTE, &client)?;
    let Json(item) = body?;

    tracing::info!(route = ROUTE, name = %item.name, "creating item");
    let created = state
        .store
        .insert(item)
        .await
        .map_err(|e| internal(ROUTE, "Error creating item.", e))?;

    tracing::info!(route = ROUTE, item_id = %created.id, "item created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /items/`
pub async fn list_items(
    State(state): State<AppState>,
    client: ClientKey,
) -> Result<Json<Vec<Item>>, ApiError> {
    const ROUTE: &str = "list_items";
    state.limiter.check(ROUTE, &client)?;

    tracing::info!(route = ROUTE, "fetching items");
    let items = state
        .store
        .list()
        .await
        .map_err(|e| internal(ROUTE, "Error fetching items.", e))?;

    if items.is_empty() && state.settings.empty_list_not_found {
        tracing::warn!(route = ROUTE, "no items found");
        return Err(ApiError::NotFound("No items found."));
    }

    tracing::info!(route = ROUTE, count = items.len(), "items fetched");
    Ok(Json(items))
}

/// `GET /items/{item_id}/`
pub async fn get_item(
    State(state): State<AppState>,
    client: ClientKey,
    Path(item_id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    const ROUTE: &str = "get_item";
    state.limiter.check(ROUTE, &client)?;
    let id = parse_id(ROUTE, &item_id)?;

    tracing::info!(route = ROUTE, item_id, "fetching item");
    match state.store.find(id.as_str()).await {
        Ok(Some(item)) => {
            tracing::info!(route = ROUTE, item_id, "item fetched");
            Ok(Json(item))
        }
        Ok(None) => {
            tracing::warn!(route = ROUTE, item_id, "item not found");
            Err(ApiError::NotFound("Item not found."))
        }
        Err(e) => Err(internal(ROUTE, "Error fetching item.", e)),
    }
}

/// `PUT /items/{item_id}/`
pub async fn update_item(
    State(state): State<AppState>,
    client: ClientKey,
    Path(item_id): Path<String>,
    body: Result<Json<ItemCreate>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    const ROUTE: &str = "update_item";
    state.limiter.check(ROUTE, &client)?;
    let id = parse_id(ROUTE, &item_id)?;
    let Json(item) = body?;

    tracing::info!(route = ROUTE, item_id, "updating item");
    match state.store.replace(id.as_str(), item).await {
        Ok(Some(updated)) => {
            tracing::info!(route = ROUTE, item_id, "item updated");
            Ok(Json(updated))
        }
        Ok(None) => {
            tracing::warn!(route = ROUTE, item_id, "item not found for update");
            Err(ApiError::NotFound("Item not found or not updated."))
        }
        Err(e) => Err(internal(ROUTE, "Error updating item.", e)),
    }
}

/// `PATCH /items/{item_id}/`
pub async fn patch_item(
    State(state): State<AppState>,
    client: ClientKey,
    Path(item_id): Path<String>,
    body: Result<Json<ItemPatch>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    const ROUTE: &str = "patch_item";
    state.limiter.check(ROUTE, &client)?;
    let id = parse_id(ROUTE, &item_id)?;
    let Json(patch) = body?;

    tracing::info!(route = ROUTE, item_id, empty = patch.is_empty(), "patching item");
    match state.store.update(id.as_str(), patch).await {
        Ok(Some(patched)) => {
            tracing::info!(route = ROUTE, item_id, "item patched");
            Ok(Json(patched))
        }
        Ok(None) => {
            tracing::warn!(route = ROUTE, item_id, "item not found for patch");
            Err(ApiError::NotFound("Item not found or not patched."))
        }
        Err(e) => Err(internal(ROUTE, "Error patching item.", e)),
    }
}

/// `DELETE /items/{item_id}/`
pub async fn delete_item(
    State(state): State<AppState>,
    client: ClientKey,
    Path(item_id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    const ROUTE: &str = "delete_item";
    state.limiter.check(ROUTE, &client)?;
    let id = parse_id(ROUTE, &item_id)?;

    tracing::info!(route = ROUTE, item_id, "deleting item");
    match state.store.delete(id.as_str()).await {
        Ok(Some(deleted)) => {
            tracing::info!(route = ROUTE, item_id, "item deleted");
            Ok(Json(deleted))
        }
        Ok(None) => {
            tracing::warn!(route = ROUTE, item_id, "item not found for delete");
            Err(ApiError::NotFound("Item not found or not deleted."))
        }
        Err(e) => Err(internal(ROUTE, "Error deleting item.", e)),
    }
}
