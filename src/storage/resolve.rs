//! Path resolution for stored files.
//!
//! Every client-supplied name passes through [`resolve`] before it touches
//! the filesystem. The contract: the returned path is always a direct child
//! of the storage root, or the name is rejected as [`PdfdropError::PathTraversal`].

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::{PdfdropError, Result};

/// Reduce an untrusted candidate name to its final path segment.
///
/// Both `/` and `\` count as separators, so `a/b/c.pdf`, `..\..\c.pdf` and
/// `C:\evil\c.pdf` all reduce to `c.pdf`. Rejects names whose final segment
/// is empty, `.`, `..`, or contains a NUL byte.
pub fn sanitize_name(candidate: &str) -> Result<String> {
    let segment = candidate
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .to_string();

    if segment.is_empty() || segment == "." || segment == ".." {
        return Err(PdfdropError::PathTraversal(candidate.to_string()));
    }
    if segment.contains('\0') {
        return Err(PdfdropError::PathTraversal(candidate.to_string()));
    }

    Ok(segment)
}

/// Resolve an untrusted candidate name against a canonical storage root.
///
/// `storage_root` must already be canonical (see `FileStore::new`). The
/// sanitized segment is joined to the root; if the joined path exists it is
/// canonicalized and its parent must be exactly the root, which defeats
/// symlinks planted inside the root. A non-existent target is safe by
/// construction since the segment is a single normal component.
pub fn resolve(storage_root: &Path, candidate: &str) -> Result<PathBuf> {
    let segment = sanitize_name(candidate)?;
    let joined = storage_root.join(&segment);

    // The join must not have introduced extra components (platform quirks
    // around prefixes would show up here).
    let relative = joined
        .strip_prefix(storage_root)
        .map_err(|_| PdfdropError::PathTraversal(candidate.to_string()))?;
    let mut components = relative.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => return Err(PdfdropError::PathTraversal(candidate.to_string())),
    }

    if joined.exists() {
        let canonical = fs::canonicalize(&joined)?;
        if canonical.parent() != Some(storage_root) {
            return Err(PdfdropError::PathTraversal(candidate.to_string()));
        }
        return Ok(canonical);
    }

    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn canonical_root() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        (temp_dir, root)
    }

    #[test]
    fn test_sanitize_plain_name() {
        assert_eq!(sanitize_name("report.pdf").unwrap(), "report.pdf");
    }

    #[test]
    fn test_sanitize_takes_final_segment() {
        assert_eq!(sanitize_name("a/b/c.pdf").unwrap(), "c.pdf");
        assert_eq!(sanitize_name("..\\..\\c.pdf").unwrap(), "c.pdf");
        assert_eq!(sanitize_name("/absolute/path.pdf").unwrap(), "path.pdf");
        assert_eq!(sanitize_name("C:\\evil\\doc.pdf").unwrap(), "doc.pdf");
    }

    #[test]
    fn test_sanitize_rejects_empty_and_dots() {
        assert!(sanitize_name("").is_err());
        assert!(sanitize_name(".").is_err());
        assert!(sanitize_name("..").is_err());
        assert!(sanitize_name("a/b/").is_err());
        assert!(sanitize_name("../..").is_err());
    }

    #[test]
    fn test_sanitize_rejects_nul() {
        assert!(sanitize_name("doc\0.pdf").is_err());
    }

    #[test]
    fn test_resolve_plain_name() {
        let (_temp_dir, root) = canonical_root();

        let path = resolve(&root, "doc.pdf").unwrap();

        assert_eq!(path, root.join("doc.pdf"));
        assert_eq!(path.parent(), Some(root.as_path()));
    }

    #[test]
    fn test_resolve_traversal_sequences() {
        let (_temp_dir, root) = canonical_root();

        // Multi-segment names reduce to their final segment, never escape
        let path = resolve(&root, "../../etc/passwd").unwrap();
        assert_eq!(path, root.join("passwd"));

        assert!(resolve(&root, "..").is_err());
        assert!(resolve(&root, "../..").is_err());
        assert!(resolve(&root, "uploads/..").is_err());
    }

    #[test]
    fn test_resolve_existing_file_canonicalizes() {
        let (_temp_dir, root) = canonical_root();
        fs::write(root.join("real.pdf"), b"%PDF-").unwrap();

        let path = resolve(&root, "real.pdf").unwrap();

        assert_eq!(path, root.join("real.pdf"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_rejects_symlink_escape() {
        let (_temp_dir, root) = canonical_root();
        let outside = TempDir::new().unwrap();
        let secret = outside.path().join("secret.pdf");
        fs::write(&secret, b"%PDF-secret").unwrap();

        std::os::unix::fs::symlink(&secret, root.join("link.pdf")).unwrap();

        let result = resolve(&root, "link.pdf");
        assert!(matches!(result, Err(PdfdropError::PathTraversal(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_rejects_symlinked_directory_escape() {
        let (_temp_dir, root) = canonical_root();
        let outside = TempDir::new().unwrap();

        std::os::unix::fs::symlink(outside.path(), root.join("subdir")).unwrap();

        // The name reduces to "subdir"; canonicalizing it leaves the root
        let result = resolve(&root, "subdir");
        assert!(matches!(result, Err(PdfdropError::PathTraversal(_))));
    }

    #[test]
    fn test_resolve_never_escapes_root() {
        let (_temp_dir, root) = canonical_root();
        let hostile = [
            "../../../etc/passwd",
            "..%2F..%2Fetc%2Fpasswd",
            "/etc/passwd",
            "....//....//etc/passwd",
            "..\\..\\windows\\system32",
        ];

        for name in hostile {
            match resolve(&root, name) {
                Ok(path) => assert_eq!(path.parent(), Some(root.as_path())),
                Err(PdfdropError::PathTraversal(_)) => {}
                Err(e) => panic!("unexpected error for {name}: {e}"),
            }
        }
    }
}
