//! API handlers for pdfdrop.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::storage::{validate, FileStore, PDF_MIME};
use crate::web::dto::{FileEntryResponse, UploadResponse};
use crate::web::error::ApiError;

/// Shared application state.
///
/// Immutable after construction; the filesystem under the store's root is
/// the only mutable state in the service.
#[derive(Debug, Clone)]
pub struct AppState {
    /// File store rooted at the configured upload directory.
    pub store: FileStore,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: u64,
}

impl AppState {
    /// Create application state from a file store and upload limit.
    pub fn new(store: FileStore, max_upload_bytes: u64) -> Self {
        Self {
            store,
            max_upload_bytes,
        }
    }
}

/// Generate a safe Content-Disposition header value.
///
/// Stored names are server-generated ASCII, but the value is still stripped
/// of control characters and quotes so it can never inject headers.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    format!("attachment; filename=\"{sanitized}\"")
}

/// POST /upload - Upload a PDF file.
///
/// Request body: multipart/form-data with a single "file" field.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        multipart_error(e)
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            filename = field.file_name().map(|s| s.to_string());
            content_type = field.content_type().map(|s| s.to_string());
            content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to read file content: {}", e);
                        multipart_error(e)
                    })?
                    .to_vec(),
            );
        }
    }

    let filename = filename.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    let content_type = content_type.unwrap_or_default();
    let content = content.ok_or_else(|| ApiError::bad_request("No file content"))?;

    let upload = validate(content, &content_type, &filename, state.max_upload_bytes)?;

    let stored = state.store.store(&upload).map_err(|e| {
        tracing::error!("Failed to store upload: {}", e);
        ApiError::internal("Failed to store file")
    })?;

    tracing::info!(
        "stored upload {} ({} bytes) as {}",
        stored.original_name,
        stored.size_bytes,
        stored.stored_name
    );

    Ok((StatusCode::CREATED, Json(UploadResponse::from(stored))))
}

/// Translate a multipart read error, preserving body-limit rejections.
fn multipart_error(e: axum::extract::multipart::MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large("upload exceeds the size limit")
    } else {
        ApiError::bad_request("Invalid multipart data")
    }
}

/// GET /download/{name} - Download a stored file.
///
/// The name goes through the path resolver; traversal attempts and missing
/// files both answer 404.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let (file, size) = state.store.retrieve(&name)?;

    let stream = ReaderStream::new(tokio::fs::File::from_std(file));

    let response = Response::builder()
        .header(header::CONTENT_TYPE, PDF_MIME)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&name),
        )
        .header(header::CONTENT_LENGTH, size)
        .body(Body::from_stream(stream))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}

/// GET /files - List stored files.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FileEntryResponse>>, ApiError> {
    let entries = state.store.list().map_err(|e| {
        tracing::error!("Failed to list files: {}", e);
        ApiError::internal("Failed to list files")
    })?;

    Ok(Json(
        entries.into_iter().map(FileEntryResponse::from).collect(),
    ))
}

/// GET /health - Health check.
pub async fn health_check() -> &'static str {
    "OK"
}
