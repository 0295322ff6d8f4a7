//! Items API Protocol
//!
//! Endpoint paths and the JSON envelopes returned by the items handlers.

use super::types::Item;
use serde::Serialize;

// --- API Endpoints ---

/// Collection endpoint: list (GET) and create (POST).
pub const ENDPOINT_ITEMS: &str = "/api/v1/items";
/// Single item endpoint, relative to `ENDPOINT_ITEMS`: read, update, delete.
pub const ENDPOINT_ITEM: &str = "/:id";

// --- Response Envelopes ---

/// Response for the list endpoint.
#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub status: &'static str,
    pub data: Vec<Item>,
    pub count: usize,
}

/// Response carrying a single item, with an optional confirmation message
/// for writes.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Item,
}
