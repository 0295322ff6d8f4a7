//! Item Service Module
//!
//! The core of the service: an in-memory store of generic "item" records with
//! validation, merge-on-update, and query filtering.
//!
//! ## Responsibilities
//! - **Storage**: `ItemStore` exclusively owns every item behind a single lock and
//!   hands out clones.
//! - **Validation**: Every candidate record is checked before it is committed;
//!   invalid records never reach the map.
//! - **Filtering**: List results are narrowed by `field=value` pairs and ordered by
//!   `updatedAt`, newest first.
//! - **API**: RESTful CRUD handlers under `/api/v1/items`.
//!
//! ## Submodules
//! - **`clock`**: Injectable time source (`SystemClock`, `ManualClock`).
//! - **`filter`**: Filter matching and result ordering.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`protocol`**: Endpoint paths and response envelopes.
//! - **`store`**: The `ItemStore` itself.
//! - **`types`**: `Item`, `ItemPatch`, and the extra field value set.
//! - **`validator`**: The ordered validation rules.

pub mod clock;
pub mod filter;
pub mod handlers;
pub mod protocol;
pub mod store;
pub mod types;
pub mod validator;
