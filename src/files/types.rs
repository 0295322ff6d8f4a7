//! File Storage Data Types

use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata for one stored file, as returned by the listing endpoint.
///
/// `created` is `None` on filesystems that do not record a birth time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    #[serde(serialize_with = "timestamp::serialize_option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(serialize_with = "timestamp::serialize_option")]
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Invalid filename")]
    InvalidName(String),

    #[error("File '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
