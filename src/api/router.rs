use super::middleware::log_requests;
use super::protocol::{
    API_PREFIX, API_VERSION, ApiIndexResponse, EndpointIndex, STATUS_SUCCESS, WelcomeResponse,
};
use crate::config::AppConfig;
use crate::files::handlers::{
    handle_delete_file, handle_download_file, handle_list_files, handle_upload_file,
};
use crate::files::protocol::{ENDPOINT_FILE, ENDPOINT_FILES};
use crate::files::storage::FileStore;
use crate::items::handlers::{
    handle_create_item, handle_delete_item, handle_get_item, handle_list_items,
    handle_update_item,
};
use crate::items::protocol::{ENDPOINT_ITEM, ENDPOINT_ITEMS};
use crate::items::store::ItemStore;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::{Extension, Json, Router, middleware};
use std::sync::Arc;

/// Assembles the full HTTP surface: items, files, the API index, the welcome
/// fallback, and request logging around all of it.
pub fn build_router(items: Arc<ItemStore>, files: Arc<FileStore>, config: &AppConfig) -> Router {
    let item_routes = Router::new()
        .route("/", get(handle_list_items).post(handle_create_item))
        .route(
            ENDPOINT_ITEM,
            get(handle_get_item)
                .put(handle_update_item)
                .delete(handle_delete_item),
        );

    let file_routes = Router::new()
        .route("/", get(handle_list_files).post(handle_upload_file))
        .route(
            ENDPOINT_FILE,
            get(handle_download_file).delete(handle_delete_file),
        )
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    Router::new()
        .route(API_PREFIX, get(handle_api_index))
        .nest(ENDPOINT_ITEMS, item_routes)
        .nest(ENDPOINT_FILES, file_routes)
        .fallback(handle_welcome)
        .layer(Extension(items))
        .layer(Extension(files))
        .layer(Extension(config.environment))
        .layer(middleware::from_fn(log_requests))
}

pub async fn handle_api_index() -> Json<ApiIndexResponse> {
    Json(ApiIndexResponse {
        status: STATUS_SUCCESS,
        message: format!("Welcome to the REST API {}", API_VERSION),
        endpoints: EndpointIndex {
            items: ENDPOINT_ITEMS.to_string(),
            files: ENDPOINT_FILES.to_string(),
        },
    })
}

pub async fn handle_welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the REST API!",
        documentation: "See README.md for API documentation",
    })
}
