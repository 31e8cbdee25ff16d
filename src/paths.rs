//! Directory containment for client-supplied paths.
//!
//! Each designated directory is opened once as a `strict_path::PathBoundary`.
//! A client path is made relative to that boundary and validated with
//! `strict_join`, which resolves `..` and symlinks and rejects anything that
//! lands outside. The directory itself does not count as inside.

use std::io;
use std::path::{Path, PathBuf};

use strict_path::{PathBoundary, StrictPathError};

/// Marker for the upload directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadArea;

/// Marker for the generated report directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportArea;

pub type UploadBoundary = PathBoundary<UploadArea>;
pub type ReportBoundary = PathBoundary<ReportArea>;

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("Path escapes its directory: {0}")]
    OutsideDirectory(String),

    #[error("Path rejected: {0}")]
    Boundary(#[from] StrictPathError),

    #[error("Cannot resolve path: {0}")]
    Io(#[from] io::Error),
}

/// Open (creating if needed) the boundary for `dir`.
pub fn open_boundary<M>(dir: &Path) -> Result<PathBoundary<M>, PathError> {
    Ok(PathBoundary::try_new_create(dir)?)
}

/// Resolve `candidate` and require it to be strictly inside `boundary`.
///
/// Relative candidates are interpreted against the process working
/// directory, matching how the stored paths handed out by the upload
/// handler are formed. The returned path is the resolved absolute path.
pub fn resolve_within<M>(boundary: &PathBoundary<M>, candidate: &Path) -> Result<PathBuf, PathError> {
    let root = Path::new(boundary.interop_path());
    let absolute = std::path::absolute(candidate)?;
    let relative = match absolute.strip_prefix(root) {
        Ok(rest) => rest.to_path_buf(),
        // Not lexically under the canonical root; strict_join decides.
        Err(_) => absolute,
    };

    let joined = boundary.strict_join(&relative)?;
    let resolved = PathBuf::from(joined.interop_path());
    if resolved.as_path() == root {
        return Err(PathError::OutsideDirectory(candidate.display().to_string()));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn is_within<M>(boundary: &PathBoundary<M>, candidate: &Path) -> bool {
        resolve_within(boundary, candidate).is_ok()
    }

    fn setup() -> (tempfile::TempDir, PathBuf, UploadBoundary) {
        let root = tempfile::tempdir().unwrap();
        let uploads = root.path().join("uploads");
        let boundary = open_boundary(&uploads).unwrap();
        (root, uploads, boundary)
    }

    #[test]
    fn open_boundary_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("temp");
        let _boundary: ReportBoundary = open_boundary(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn file_inside_directory_is_accepted() {
        let (_root, uploads, boundary) = setup();
        let file = uploads.join("a.png");
        fs::write(&file, b"x").unwrap();
        let resolved = resolve_within(&boundary, &file).unwrap();
        assert!(resolved.ends_with("uploads/a.png"));
        assert!(resolved.is_file());
    }

    #[test]
    fn missing_file_inside_directory_is_still_inside() {
        let (_root, uploads, boundary) = setup();
        assert!(is_within(&boundary, &uploads.join("not-yet.png")));
    }

    #[test]
    fn parent_traversal_is_rejected() {
        let (root, uploads, boundary) = setup();
        fs::write(root.path().join("secret.txt"), b"x").unwrap();
        let sneaky = uploads.join("..").join("secret.txt");
        assert!(resolve_within(&boundary, &sneaky).is_err());
    }

    #[test]
    fn sibling_with_shared_prefix_is_rejected() {
        let (root, _uploads, boundary) = setup();
        let sibling = root.path().join("uploads2");
        fs::create_dir_all(&sibling).unwrap();
        fs::write(sibling.join("x.png"), b"x").unwrap();
        assert!(!is_within(&boundary, &sibling.join("x.png")));
    }

    #[test]
    fn directory_itself_is_not_inside() {
        let (_root, uploads, boundary) = setup();
        assert!(matches!(
            resolve_within(&boundary, &uploads),
            Err(PathError::OutsideDirectory(_))
        ));
        assert!(!is_within(&boundary, &uploads.join(".")));
    }

    #[test]
    fn absolute_system_path_is_rejected() {
        let (_root, _uploads, boundary) = setup();
        assert!(!is_within(&boundary, Path::new("/etc/passwd")));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_escaping_directory_is_rejected() {
        let (root, uploads, boundary) = setup();
        let outside = root.path().join("outside.png");
        fs::write(&outside, b"x").unwrap();
        let link = uploads.join("link.png");
        std::os::unix::fs::symlink(&outside, &link).unwrap();
        assert!(!is_within(&boundary, &link));
    }
}
