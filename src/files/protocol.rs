//! Files API Protocol

use super::types::FileInfo;
use serde::Serialize;

/// Collection endpoint: list (GET) and upload (POST, multipart form).
pub const ENDPOINT_FILES: &str = "/api/v1/files";
/// Single file endpoint, relative to `ENDPOINT_FILES`: download and delete.
pub const ENDPOINT_FILE: &str = "/:filename";

/// Largest accepted upload body.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10_000_000;

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub status: &'static str,
    pub data: Vec<FileInfo>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct UploadedFile {
    pub filename: String,
    pub size: u64,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub message: String,
    pub data: UploadedFile,
}
