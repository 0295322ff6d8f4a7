//! File Storage Module
//!
//! Upload, list, download and delete files in a single flat directory on local
//! disk. Filenames arriving from clients are checked by `path::is_safe_filename`
//! before any filesystem call, so requests cannot escape the upload directory.
//!
//! ## Submodules
//! - **`handlers`**: HTTP handlers under `/api/v1/files`.
//! - **`path`**: The filename safety predicate.
//! - **`protocol`**: Endpoint paths, upload limit and response envelopes.
//! - **`storage`**: `FileStore`, the async filesystem wrapper.
//! - **`types`**: `FileInfo` and `FileError`.

pub mod handlers;
pub mod path;
pub mod protocol;
pub mod storage;
pub mod types;
