//! Storage module for pdfdrop.
//!
//! This module provides the secure storage core:
//! - Path resolution confined to the storage root
//! - Upload validation (size ceiling, MIME type, PDF byte signature)
//! - Atomic persistence and retrieval of stored files

mod store;

pub mod resolve;
pub mod validate;

pub use store::{FileEntry, FileStore, StoredFile};
pub use validate::{generate_stored_name, validate, ValidatedUpload, PDF_MAGIC, PDF_MIME};
