//! HTTP API Layer
//!
//! Glue between Axum and the item/file components.
//!
//! - **`router`**: Builds the `Router` and the index/welcome endpoints.
//! - **`middleware`**: Per-request logging with request ids and timing headers.
//! - **`error`**: `ApiError`, the single failure type handlers return, and its
//!   status mapping.
//! - **`protocol`**: Shared envelopes and route prefixes.

pub mod error;
pub mod middleware;
pub mod protocol;
pub mod router;
