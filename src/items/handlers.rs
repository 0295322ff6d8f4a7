use super::filter::Filters;
use super::protocol::{ItemListResponse, ItemResponse};
use super::store::ItemStore;
use super::types::ItemPatch;
use crate::api::error::ApiError;
use crate::api::protocol::{MessageResponse, STATUS_SUCCESS};

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_list_items(
    Extension(store): Extension<Arc<ItemStore>>,
    query: Result<Query<Filters>, QueryRejection>,
) -> Result<Json<ItemListResponse>, ApiError> {
    let Query(filters) = query.map_err(|rejection| {
        tracing::warn!("Rejected list query: {}", rejection);
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    })?;

    let items = store.list(&filters);
    tracing::debug!("Listed {} items ({} filters)", items.len(), filters.len());

    Ok(Json(ItemListResponse {
        status: STATUS_SUCCESS,
        count: items.len(),
        data: items,
    }))
}

pub async fn handle_get_item(
    Extension(store): Extension<Arc<ItemStore>>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    match store.get(&id) {
        Some(item) => Ok(Json(ItemResponse {
            status: STATUS_SUCCESS,
            message: None,
            data: item,
        })),
        None => Err(not_found(&id)),
    }
}

pub async fn handle_create_item(
    Extension(store): Extension<Arc<ItemStore>>,
    body: Bytes,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let patch = parse_patch(&body)?;

    match store.create(patch) {
        Ok(item) => {
            tracing::info!("Created item {}", item.id);
            Ok((
                StatusCode::CREATED,
                Json(ItemResponse {
                    status: STATUS_SUCCESS,
                    message: Some("Item created successfully".to_string()),
                    data: item,
                }),
            ))
        }
        Err(e) => {
            tracing::warn!("Rejected item creation: {}", e);
            Err(e.into())
        }
    }
}

pub async fn handle_update_item(
    Extension(store): Extension<Arc<ItemStore>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ItemResponse>, ApiError> {
    let patch = parse_patch(&body)?;

    match store.update(&id, patch) {
        Ok(Some(item)) => {
            tracing::info!("Updated item {}", item.id);
            Ok(Json(ItemResponse {
                status: STATUS_SUCCESS,
                message: Some("Item updated successfully".to_string()),
                data: item,
            }))
        }
        Ok(None) => Err(not_found(&id)),
        Err(e) => {
            tracing::warn!("Rejected update of item {}: {}", id, e);
            Err(e.into())
        }
    }
}

pub async fn handle_delete_item(
    Extension(store): Extension<Arc<ItemStore>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !store.delete(&id) {
        return Err(not_found(&id));
    }

    tracing::info!("Deleted item {}", id);
    Ok(Json(MessageResponse::success(format!(
        "Item with ID {} deleted successfully",
        id
    ))))
}

fn parse_patch(body: &[u8]) -> Result<ItemPatch, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::BadRequest("Request body is missing".to_string()));
    }

    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        tracing::error!("Failed to parse request body: {}", e);
        ApiError::BadRequest(format!("Invalid JSON body: {}", e))
    })?;

    Ok(ItemPatch::from_json(value)?)
}

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Item with ID {} not found", id))
}
