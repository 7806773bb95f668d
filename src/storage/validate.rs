//! Upload validation.
//!
//! Client-declared filenames and content types are untrusted. Trust comes
//! only from server-side content inspection (the `%PDF-` signature) and the
//! server-generated stored name.

use uuid::Uuid;

use super::resolve::sanitize_name;
use crate::{PdfdropError, Result};

/// The only accepted declared content type.
pub const PDF_MIME: &str = "application/pdf";

/// Byte signature every PDF starts with.
pub const PDF_MAGIC: &[u8; 5] = b"%PDF-";

/// Extension given to every stored file.
pub const STORED_EXTENSION: &str = "pdf";

/// An upload that passed all checks, ready to be written by the file store.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    /// Client filename reduced to its final segment. Display only, never
    /// used in path construction.
    pub original_name: String,
    /// Server-generated opaque name (`{uuid}.pdf`) used for storage.
    pub stored_name: String,
    /// The raw file bytes.
    pub content: Vec<u8>,
}

/// Generate a fresh opaque stored name.
pub fn generate_stored_name() -> String {
    format!("{}.{}", Uuid::new_v4(), STORED_EXTENSION)
}

/// Validate an upload.
///
/// Checks in order: size ceiling, declared content type, byte signature,
/// filename. The declared type alone is never sufficient; the buffer must
/// actually start with `%PDF-`.
pub fn validate(
    content: Vec<u8>,
    declared_content_type: &str,
    declared_filename: &str,
    max_size_bytes: u64,
) -> Result<ValidatedUpload> {
    if content.len() as u64 > max_size_bytes {
        return Err(PdfdropError::PayloadTooLarge {
            actual: content.len() as u64,
            limit: max_size_bytes,
        });
    }

    if declared_content_type != PDF_MIME {
        return Err(PdfdropError::UnsupportedMediaType(
            declared_content_type.to_string(),
        ));
    }

    if content.len() < PDF_MAGIC.len() || &content[..PDF_MAGIC.len()] != PDF_MAGIC {
        return Err(PdfdropError::UnsupportedMediaType(
            "content does not match the PDF signature".to_string(),
        ));
    }

    let original_name = sanitize_name(declared_filename)
        .map_err(|_| PdfdropError::InvalidArgument("missing or empty filename".to_string()))?;

    Ok(ValidatedUpload {
        original_name,
        stored_name: generate_stored_name(),
        content,
    })
}
