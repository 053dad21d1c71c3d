//! Profile picture storage on the local filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use common::{AppError, AppResult, UploadConfig};
use domain::UPLOADS_URL_PREFIX;

/// Directory-backed store for uploaded images.
///
/// Files are named `<uuid-v4><ext>` and addressed publicly as
/// `/uploads/<name>`.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            max_bytes: config.max_bytes,
        }
    }

    /// Directory files are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Largest accepted file in bytes.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Create the upload directory when missing.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Reject anything that is not declared as an image.
    pub fn check_image_type(content_type: Option<&str>) -> AppResult<()> {
        match content_type {
            Some(mime) if mime.starts_with("image/") => Ok(()),
            _ => Err(AppError::validation("Only image files are allowed")),
        }
    }

    /// Validate and write an image, returning its public path.
    pub async fn save_image(
        &self,
        original_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> AppResult<String> {
        Self::check_image_type(content_type)?;
        if bytes.len() > self.max_bytes {
            return Err(AppError::PayloadTooLarge(self.max_bytes));
        }

        let file_name = format!("{}{}", Uuid::new_v4(), extension_of(original_name));
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;
        tracing::debug!(file = %file_name, size = bytes.len(), "Stored upload");

        Ok(format!("{}/{}", UPLOADS_URL_PREFIX, file_name))
    }

    /// Delete a previously stored file by its public path.
    ///
    /// Missing files are ignored; other failures are logged.
    pub async fn remove(&self, public_path: &str) {
        let Some(path) = self.resolve(public_path) else {
            tracing::warn!(path = public_path, "Refusing to delete file outside uploads");
            return;
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = public_path, "Removed upload"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = public_path, error = %e, "Failed to remove upload"),
        }
    }

    /// Map `/uploads/<name>` to a file directly inside the upload directory.
    fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let name = public_path
            .strip_prefix(UPLOADS_URL_PREFIX)?
            .trim_start_matches('/');

        let is_plain_name = !name.is_empty()
            && Path::new(name).file_name().map(|f| f == name).unwrap_or(false)
            && name != ".."
            && name != ".";

        is_plain_name.then(|| self.dir.join(name))
    }
}

/// `.ext` of the client file name, restricted to alphanumerics.
fn extension_of(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path, max_bytes: usize) -> UploadStore {
        UploadStore::new(&UploadConfig {
            dir: dir.to_string_lossy().into_owned(),
            max_bytes,
        })
    }

    #[test]
    fn test_extension_is_sanitized() {
        assert_eq!(extension_of(Some("me.PNG")), ".png");
        assert_eq!(extension_of(Some("archive.tar.gz")), ".gz");
        assert_eq!(extension_of(Some("noext")), "");
        assert_eq!(extension_of(Some("bad.p/ng")), "");
        assert_eq!(extension_of(None), "");
    }

    #[tokio::test]
    async fn test_save_and_remove_image() {
        let tmp = tempfile::tempdir().unwrap();
        let uploads = store(tmp.path(), 1024);

        let public = uploads
            .save_image(Some("avatar.jpg"), Some("image/jpeg"), b"jpegdata")
            .await
            .unwrap();
        assert!(public.starts_with("/uploads/"));
        assert!(public.ends_with(".jpg"));

        let on_disk = tmp.path().join(public.trim_start_matches("/uploads/"));
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"jpegdata");

        uploads.remove(&public).await;
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn test_rejects_non_images_and_large_files() {
        let tmp = tempfile::tempdir().unwrap();
        let uploads = store(tmp.path(), 4);

        let not_image = uploads
            .save_image(Some("notes.txt"), Some("text/plain"), b"hi")
            .await;
        assert!(matches!(not_image, Err(AppError::Validation(_))));

        let too_large = uploads
            .save_image(Some("big.png"), Some("image/png"), b"12345")
            .await;
        assert!(matches!(too_large, Err(AppError::PayloadTooLarge(4))));

        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_resolve_stays_inside_upload_dir() {
        let uploads = store(Path::new("/srv/uploads"), 10);

        assert_eq!(
            uploads.resolve("/uploads/abc.png"),
            Some(PathBuf::from("/srv/uploads/abc.png"))
        );
        assert_eq!(uploads.resolve("/uploads/../etc/passwd"), None);
        assert_eq!(uploads.resolve("/uploads/.."), None);
        assert_eq!(uploads.resolve("/static/abc.png"), None);
    }
}
