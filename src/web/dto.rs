//! Data Transfer Objects for the pdfdrop API.

use serde::{Deserialize, Serialize};

use crate::storage::{FileEntry, StoredFile};

/// Response body for a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Server-generated stored name; use this for download.
    pub stored_name: String,
    /// Client-supplied filename, display only.
    pub original_name: String,
    /// Size of the stored content in bytes.
    pub size_bytes: u64,
}

impl From<StoredFile> for UploadResponse {
    fn from(file: StoredFile) -> Self {
        Self {
            stored_name: file.stored_name,
            original_name: file.original_name,
            size_bytes: file.size_bytes,
        }
    }
}

/// One entry in the `GET /files` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntryResponse {
    /// Stored name of the file.
    pub stored_name: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

impl From<FileEntry> for FileEntryResponse {
    fn from(entry: FileEntry) -> Self {
        Self {
            stored_name: entry.stored_name,
            size_bytes: entry.size_bytes,
        }
    }
}
