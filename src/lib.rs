//! pdfdrop - a minimal PDF upload/download demo service.
//!
//! Uploads are validated (size ceiling, declared type, `%PDF-` signature),
//! stored under server-generated opaque names, and retrieved only through a
//! path resolver that confines every name to the storage root.

pub mod config;
pub mod error;
pub mod logging;
pub mod storage;
pub mod web;

pub use config::Config;
pub use error::{PdfdropError, Result};
pub use storage::{FileEntry, FileStore, StoredFile, ValidatedUpload};
pub use web::{AppState, WebServer};
