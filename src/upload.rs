//! Upload handling: validate an incoming report image and store it under a
//! fresh collision-resistant name.
//!
//! The client's file name is only used to pick the extension. Stored names
//! are `<uuid-v4>.<ext>`, so two uploads of `report.png` never collide and
//! nothing the client sends can steer where the file lands.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("Invalid file type. Please upload PNG, JPG, or JPEG files.")]
    InvalidFileType,

    #[error("File is too large. Maximum size is {max_mb}MB")]
    TooLarge { max_mb: usize },

    #[error("Error uploading file: {0}")]
    Io(#[from] std::io::Error),
}

/// What the server accepts on `/upload`.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub allowed_extensions: HashSet<String>,
    pub max_content_length: usize,
}

impl UploadPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            allowed_extensions: config.allowed_extensions.clone(),
            max_content_length: config.max_content_length,
        }
    }

    /// True if the name has an extension on the allow-list (case-insensitive).
    pub fn allowed_file(&self, filename: &str) -> bool {
        extension_of(filename)
            .map(|ext| self.allowed_extensions.contains(&ext))
            .unwrap_or(false)
    }

    fn max_mb(&self) -> usize {
        self.max_content_length / (1024 * 1024)
    }
}

/// A file accepted by `store_upload`.
#[derive(Debug, Clone, Serialize)]
pub struct StoredUpload {
    pub path: PathBuf,
    pub extension: String,
    pub original_name: String,
    pub size_bytes: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Lowercased text after the last `.`, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// `<upload_dir>/<uuid>.<ext>` for an already-validated file name.
pub fn secure_file_path(upload_dir: &Path, extension: &str) -> PathBuf {
    upload_dir.join(format!("{}.{}", Uuid::new_v4(), extension))
}

/// Validate and persist an uploaded file. Rejections never touch the disk.
pub fn store_upload(
    policy: &UploadPolicy,
    upload_dir: &Path,
    filename: &str,
    bytes: &[u8],
) -> Result<StoredUpload, UploadError> {
    if filename.is_empty() {
        return Err(UploadError::NoFileSelected);
    }
    if !policy.allowed_file(filename) {
        tracing::warn!(filename = %sanitize_filename(filename), "Invalid file type");
        return Err(UploadError::InvalidFileType);
    }
    if bytes.is_empty() {
        return Err(UploadError::EmptyFile);
    }
    if bytes.len() > policy.max_content_length {
        return Err(UploadError::TooLarge { max_mb: policy.max_mb() });
    }

    let extension = extension_of(filename).ok_or(UploadError::InvalidFileType)?;

    std::fs::create_dir_all(upload_dir)?;
    let path = secure_file_path(upload_dir, &extension);
    std::fs::write(&path, bytes)?;

    let original_name = sanitize_filename(filename);
    tracing::info!(
        path = %path.display(),
        original = %original_name,
        size = bytes.len(),
        "File successfully uploaded"
    );

    Ok(StoredUpload {
        path,
        extension,
        original_name,
        size_bytes: bytes.len() as u64,
        created_at: chrono::Utc::now(),
    })
}

/// Sanitize a filename: removes path traversal and special characters.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .filter(|&c| c != '/' && c != '\\' && c != '\0')
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = sanitized.replace("..", "");

    let sanitized: String = sanitized.chars().take(100).collect();

    if sanitized.is_empty() {
        "document".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> UploadPolicy {
        UploadPolicy::from_config(&AppConfig::default())
    }

    // -- Extension allow-list -------------------------------------------------

    #[test]
    fn allowed_extensions_case_insensitive() {
        let p = policy();
        assert!(p.allowed_file("scan.png"));
        assert!(p.allowed_file("scan.JPG"));
        assert!(p.allowed_file("photo.final.jpeg"));
    }

    #[test]
    fn disallowed_extensions() {
        let p = policy();
        assert!(!p.allowed_file("report.pdf"));
        assert!(!p.allowed_file("noext"));
        assert!(!p.allowed_file("trailingdot."));
        assert!(!p.allowed_file("png"));
    }

    // -- Storage --------------------------------------------------------------

    #[test]
    fn store_writes_uuid_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let stored = store_upload(&policy(), dir.path(), "Report.PNG", b"pixels").unwrap();

        assert!(stored.path.starts_with(dir.path()));
        assert_eq!(stored.extension, "png");
        assert_eq!(std::fs::read(&stored.path).unwrap(), b"pixels");

        let stem = stored.path.file_stem().unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn identical_names_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let a = store_upload(&policy(), dir.path(), "report.png", b"a").unwrap();
        let b = store_upload(&policy(), dir.path(), "report.png", b"b").unwrap();

        assert_ne!(a.path, b.path);
        assert_eq!(std::fs::read(&a.path).unwrap(), b"a");
        assert_eq!(std::fs::read(&b.path).unwrap(), b"b");
    }

    #[test]
    fn rejected_upload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");

        let err = store_upload(&policy(), &uploads, "evil.exe", b"MZ").unwrap_err();
        assert!(matches!(err, UploadError::InvalidFileType));
        assert!(!uploads.exists());
    }

    #[test]
    fn empty_name_and_empty_payload_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            store_upload(&policy(), dir.path(), "", b"x"),
            Err(UploadError::NoFileSelected)
        ));
        assert!(matches!(
            store_upload(&policy(), dir.path(), "a.png", b""),
            Err(UploadError::EmptyFile)
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let small = UploadPolicy {
            max_content_length: 4,
            ..policy()
        };
        assert!(matches!(
            store_upload(&small, dir.path(), "a.png", b"12345"),
            Err(UploadError::TooLarge { .. })
        ));
    }

    #[test]
    fn traversal_in_name_does_not_affect_location() {
        let dir = tempfile::tempdir().unwrap();
        let stored = store_upload(&policy(), dir.path(), "../../etc/x.png", b"x").unwrap();
        assert_eq!(stored.path.parent().unwrap(), dir.path());
    }

    // -- Filename sanitization ------------------------------------------------

    #[test]
    fn sanitize_path_traversal() {
        let result = sanitize_filename("../../../etc/passwd");
        assert!(!result.contains(".."));
        assert!(!result.contains('/'));
    }

    #[test]
    fn sanitize_special_chars() {
        assert_eq!(sanitize_filename("my file (1).jpg"), "my_file__1_.jpg");
    }

    #[test]
    fn sanitize_empty_name() {
        assert_eq!(sanitize_filename(""), "document");
    }

    #[test]
    fn sanitize_long_name() {
        assert!(sanitize_filename(&"a".repeat(200)).len() <= 100);
    }
}
