//! CRUD handlers for `/items`.
//!
//! Each handler decodes its input, makes exactly one store call bounded by the
//! request [`Deadline`], and encodes the outcome. Errors are converted where
//! they happen; nothing is retried.

use crate::dtos::{
    DeleteItemResponse, InsertItemResponse, ItemRequest, ItemResponse, UpdateItemResponse,
};
use crate::startup::AppState;
use crate::utils::{ItemId, JsonBody};
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::middleware::Deadline;

pub async fn create_item(
    State(state): State<AppState>,
    deadline: Deadline,
    JsonBody(req): JsonBody<ItemRequest>,
) -> Result<Json<InsertItemResponse>, AppError> {
    let item = req.into_item();

    let inserted_id = deadline
        .run(state.store.insert(item))
        .await
        .map_err(|e| {
            tracing::error!(
                remaining_ms = deadline.remaining().as_millis() as u64,
                "Failed to insert item: {}",
                e
            );
            e
        })?;

    tracing::info!(item_id = %inserted_id, "Item created");

    Ok(Json(InsertItemResponse {
        inserted_id: inserted_id.to_hex(),
    }))
}

/// Any lookup failure, not just a miss, is reported as 404.
pub async fn get_item(
    State(state): State<AppState>,
    deadline: Deadline,
    ItemId(id): ItemId,
) -> Result<Json<ItemResponse>, AppError> {
    let item = deadline
        .run(state.store.find_by_id(id))
        .await
        .map_err(|e| {
            tracing::error!(
                item_id = %id,
                remaining_ms = deadline.remaining().as_millis() as u64,
                "Item lookup failed: {}",
                e
            );
            AppError::NotFound(anyhow::anyhow!("item {} not found: {}", id, e))
        })?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("item {} not found", id)))?;

    Ok(Json(ItemResponse::from(item)))
}

pub async fn get_all_items(
    State(state): State<AppState>,
    deadline: Deadline,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let items = deadline
        .run(state.store.find_all())
        .await
        .map_err(|e| {
            tracing::error!(
                remaining_ms = deadline.remaining().as_millis() as u64,
                "Failed to list items: {}",
                e
            );
            e
        })?;

    tracing::debug!(count = items.len(), "Listed items");

    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

pub async fn update_item(
    State(state): State<AppState>,
    deadline: Deadline,
    ItemId(id): ItemId,
    JsonBody(req): JsonBody<ItemRequest>,
) -> Result<Json<UpdateItemResponse>, AppError> {
    // An empty patch still goes to storage: it matches without modifying.
    let patch = req.into_patch();

    let outcome = deadline
        .run(state.store.update(id, &patch))
        .await
        .map_err(|e| {
            tracing::error!(
                item_id = %id,
                remaining_ms = deadline.remaining().as_millis() as u64,
                "Failed to update item: {}",
                e
            );
            e
        })?;

    tracing::info!(
        item_id = %id,
        matched = outcome.matched_count,
        modified = outcome.modified_count,
        "Item updated"
    );

    Ok(Json(UpdateItemResponse {
        matched_count: outcome.matched_count,
        modified_count: outcome.modified_count,
    }))
}

pub async fn delete_item(
    State(state): State<AppState>,
    deadline: Deadline,
    ItemId(id): ItemId,
) -> Result<Json<DeleteItemResponse>, AppError> {
    let deleted_count = deadline
        .run(state.store.delete(id))
        .await
        .map_err(|e| {
            tracing::error!(
                item_id = %id,
                remaining_ms = deadline.remaining().as_millis() as u64,
                "Failed to delete item: {}",
                e
            );
            e
        })?;

    tracing::info!(item_id = %id, deleted = deleted_count, "Item deleted");

    Ok(Json(DeleteItemResponse { deleted_count }))
}
