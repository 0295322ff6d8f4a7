//! Items REST API Library
//!
//! This library crate defines the modules that make up the service. It serves
//! as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! - **`items`**: The core. An in-memory, validated store of generic item records
//!   with merge-on-update semantics and query filtering, plus its CRUD handlers.
//! - **`files`**: Upload, list, download and delete files in a local directory,
//!   with filename sanitization.
//! - **`api`**: Router assembly, request-logging middleware and error-to-status
//!   translation.
//! - **`config`**: Environment and command-line configuration.
//! - **`timestamp`**: ISO-8601 rendering shared by every JSON timestamp.

pub mod api;
pub mod config;
pub mod files;
pub mod items;
pub mod timestamp;
