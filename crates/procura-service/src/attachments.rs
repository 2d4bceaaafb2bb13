//! Quotation file storage.
//!
//! The [`AttachmentStore`] trait is the seam where a cloud object-storage
//! backend would plug in; the filesystem backend stores files under the
//! configured uploads directory and returns the public URL path they are
//! served from.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;

/// File extensions accepted for quotation uploads.
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];

/// Errors that can occur storing an attachment.
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    /// Filesystem operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file type is not in the allow-list.
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
}

/// Storage for uploaded quotation files.
///
/// Implementations persist the file and return a dereferenceable reference
/// string (URL or path) that is stored on the request.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Persist an uploaded file and return its reference.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::UnsupportedType`] for disallowed file
    /// types, or an IO error if the write fails.
    async fn save(&self, filename: &str, data: &[u8]) -> Result<String, AttachmentError>;
}

/// Filesystem-backed attachment storage.
///
/// Files are written as `{millis}-{sanitized stem}.{ext}` so names never
/// collide and never escape the uploads directory.
pub struct DiskAttachments {
    base_dir: PathBuf,
    public_path: String,
}

impl DiskAttachments {
    /// Create a backend writing under `base_dir`, returning references
    /// prefixed with `public_path` (e.g. `/uploads`).
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, public_path: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            public_path: public_path.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AttachmentStore for DiskAttachments {
    async fn save(&self, filename: &str, data: &[u8]) -> Result<String, AttachmentError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AttachmentError::UnsupportedType(extension));
        }

        let stem = sanitize_stem(
            Path::new(filename)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("cotizacion"),
        );
        let name = format!("{}-{stem}.{extension}", Utc::now().timestamp_millis());

        tokio::fs::create_dir_all(&self.base_dir).await?;
        tokio::fs::write(self.base_dir.join(&name), data).await?;

        tracing::debug!(file = %name, bytes = data.len(), "attachment stored");
        Ok(format!("{}/{name}", self.public_path))
    }
}

/// Keep only characters that are safe in a filename and a URL path segment.
fn sanitize_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "cotizacion".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_file_and_returns_public_reference() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskAttachments::new(dir.path(), "/uploads");

        let reference = store.save("cotizacion enero.pdf", b"%PDF-1.4").await.unwrap();
        assert!(reference.starts_with("/uploads/"));
        assert!(reference.ends_with("-cotizacion-enero.pdf"));

        let stored = dir.path().join(reference.trim_start_matches("/uploads/"));
        assert_eq!(tokio::fs::read(stored).await.unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn rejects_disallowed_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskAttachments::new(dir.path(), "/uploads");

        let err = store.save("malware.exe", b"MZ").await.unwrap_err();
        assert!(matches!(err, AttachmentError::UnsupportedType(ext) if ext == "exe"));
    }

    #[tokio::test]
    async fn rejects_missing_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskAttachments::new(dir.path(), "/uploads");

        assert!(store.save("noextension", b"data").await.is_err());
    }

    #[test]
    fn stem_sanitization() {
        assert_eq!(sanitize_stem("informe q1"), "informe-q1");
        assert_eq!(sanitize_stem("../../etc/passwd"), "------etc-passwd");
        assert_eq!(sanitize_stem(""), "cotizacion");
    }
}
