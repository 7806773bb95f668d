//! File store for pdfdrop.
//!
//! Persists validated uploads as a flat directory of opaque names under a
//! single canonical root. The directory listing is the source of truth;
//! there is no manifest or database.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::resolve;
use super::validate::{ValidatedUpload, PDF_MIME};
use crate::{PdfdropError, Result};

/// A file that has been persisted under the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Server-generated opaque name, unique per upload.
    pub stored_name: String,
    /// Client filename, display only.
    pub original_name: String,
    /// Size of the stored content in bytes.
    pub size_bytes: u64,
    /// Server-verified content type.
    pub content_type: String,
}

/// One entry in a storage listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Stored name of the file.
    pub stored_name: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

/// File store rooted at a single canonical directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Canonical absolute storage root.
    root: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at `root`.
    ///
    /// The directory is created if it doesn't exist and then canonicalized,
    /// so relative configured paths become absolute at startup.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let root = fs::canonicalize(&root)?;

        Ok(Self { root })
    }

    /// Get the canonical storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist a validated upload under its generated stored name.
    ///
    /// The write is atomic from the caller's perspective: content goes to a
    /// dot-prefixed temp name first and is linked into place only once fully
    /// written. A stored-name collision fails closed instead of overwriting.
    pub fn store(&self, upload: &ValidatedUpload) -> Result<StoredFile> {
        let final_path = resolve::resolve(&self.root, &upload.stored_name)?;
        let temp_path = self.root.join(format!(".{}.tmp", upload.stored_name));

        fs::write(&temp_path, &upload.content)?;

        // hard_link refuses to replace an existing file, so a generated-name
        // collision surfaces as an error rather than a silent overwrite.
        let linked = fs::hard_link(&temp_path, &final_path);
        let _ = fs::remove_file(&temp_path);
        match linked {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(PdfdropError::Storage(format!(
                    "stored name collision: {}",
                    upload.stored_name
                )));
            }
            Err(e) => return Err(e.into()),
        }

        Ok(StoredFile {
            stored_name: upload.stored_name.clone(),
            original_name: upload.original_name.clone(),
            size_bytes: upload.content.len() as u64,
            content_type: PDF_MIME.to_string(),
        })
    }

    /// Open a stored file for reading.
    ///
    /// The name passes through the path resolver first; traversal attempts
    /// are rejected before any filesystem access. Returns the open file and
    /// its size.
    pub fn retrieve(&self, stored_name: &str) -> Result<(fs::File, u64)> {
        let path = resolve::resolve(&self.root, stored_name)?;

        let file = match fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PdfdropError::NotFound("file".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let metadata = file.metadata()?;
        if !metadata.is_file() {
            return Err(PdfdropError::NotFound("file".to_string()));
        }

        Ok((file, metadata.len()))
    }

    /// Read a stored file fully into memory.
    pub fn retrieve_bytes(&self, stored_name: &str) -> Result<Vec<u8>> {
        use std::io::Read;

        let (mut file, size) = self.retrieve(stored_name)?;
        let mut content = Vec::with_capacity(size as usize);
        file.read_to_end(&mut content)?;

        Ok(content)
    }

    /// List regular files directly under the storage root, sorted by name.
    ///
    /// Non-recursive; dot-files are skipped, which also hides in-flight
    /// temp files. A file created mid-enumeration may or may not appear.
    pub fn list(&self) -> Result<Vec<FileEntry>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(n) => n,
                Err(_) => continue,
            };
            if name.starts_with('.') {
                continue;
            }
            let metadata = match entry.metadata() {
                Ok(m) => m,
                // Entry vanished between read_dir and stat; accepted race
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            if !metadata.is_file() {
                continue;
            }

            entries.push(FileEntry {
                stored_name: name,
                size_bytes: metadata.len(),
            });
        }

        entries.sort_by(|a, b| a.stored_name.cmp(&b.stored_name));

        Ok(entries)
    }
}
