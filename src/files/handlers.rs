use super::protocol::{FileListResponse, UploadResponse, UploadedFile};
use super::storage::FileStore;
use super::types::FileError;
use crate::api::error::ApiError;
use crate::api::protocol::{MessageResponse, STATUS_SUCCESS};
use crate::config::Environment;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_list_files(
    Extension(files): Extension<Arc<FileStore>>,
    Extension(environment): Extension<Environment>,
) -> Result<Json<FileListResponse>, ApiError> {
    match files.list().await {
        Ok(data) => Ok(Json(FileListResponse {
            status: STATUS_SUCCESS,
            count: data.len(),
            data,
        })),
        Err(e) => Err(file_failure("Failed to list files", e, environment)),
    }
}

pub async fn handle_download_file(
    Extension(files): Extension<Arc<FileStore>>,
    Extension(environment): Extension<Environment>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    require_filename(&filename)?;

    let contents = files
        .read(&filename)
        .await
        .map_err(|e| file_failure("Failed to download file", e, environment))?;

    Ok((
        [
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
            (
                header::CONTENT_TYPE,
                "application/octet-stream".to_string(),
            ),
        ],
        contents,
    ))
}

pub async fn handle_upload_file(
    Extension(files): Extension<Arc<FileStore>>,
    Extension(environment): Extension<Environment>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::warn!("Rejected upload request: {}", rejection);
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    })?;

    // The first part that carries a filename is the upload; other parts are ignored.
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(upload_rejected)? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let contents = field.bytes().await.map_err(upload_rejected)?;
        upload = Some((filename, contents));
        break;
    }

    let Some((filename, contents)) = upload else {
        return Err(ApiError::BadRequest("No file uploaded".to_string()));
    };
    if filename.is_empty() {
        return Err(ApiError::BadRequest("Filename is missing".to_string()));
    }

    let size = files
        .write(&filename, &contents)
        .await
        .map_err(|e| file_failure("Failed to upload file", e, environment))?;

    tracing::info!("Stored upload '{}' ({} bytes)", filename, size);

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            status: STATUS_SUCCESS,
            message: "File uploaded successfully".to_string(),
            data: UploadedFile { filename, size },
        }),
    ))
}

pub async fn handle_delete_file(
    Extension(files): Extension<Arc<FileStore>>,
    Extension(environment): Extension<Environment>,
    Path(filename): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_filename(&filename)?;

    files
        .delete(&filename)
        .await
        .map_err(|e| file_failure("Failed to delete file", e, environment))?;

    tracing::info!("Deleted file '{}'", filename);
    Ok(Json(MessageResponse::success(format!(
        "File '{}' deleted successfully",
        filename
    ))))
}

fn require_filename(filename: &str) -> Result<(), ApiError> {
    if filename.is_empty() {
        return Err(ApiError::BadRequest("Filename is required".to_string()));
    }
    Ok(())
}

fn upload_rejected(err: MultipartError) -> ApiError {
    tracing::warn!("Failed to read upload: {}", err);
    ApiError::Rejected {
        status: err.status(),
        message: format!("Failed to upload file: {}", err.body_text()),
    }
}

fn file_failure(action: &str, err: FileError, environment: Environment) -> ApiError {
    match err {
        FileError::InvalidName(_) => ApiError::BadRequest(err.to_string()),
        FileError::NotFound(_) => ApiError::NotFound(err.to_string()),
        FileError::Io(ref io) => {
            tracing::error!("{}: {}", action, io);
            ApiError::internal(format!("{}: {}", action, io), io, environment)
        }
    }
}
