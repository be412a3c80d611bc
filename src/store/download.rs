use async_trait::async_trait;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Local side effect of a certificate download
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Persist the downloaded bytes for certificate `id`, returning where they landed
    async fn save(&self, id: &str, bytes: Vec<u8>) -> io::Result<PathBuf>;
}

/// File name a downloaded certificate is saved under
pub fn download_file_name(id: &str) -> String {
    let safe: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("certificate-{safe}.pdf")
}

/// Temporary file holding downloaded bytes until they are saved.
///
/// Deleted on `release`, or on drop if an early return skips it.
pub struct TransientHandle {
    file: NamedTempFile,
}

impl TransientHandle {
    pub fn create(dir: &Path, bytes: &[u8]) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(".relcert-")
            .suffix(".part")
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        tracing::trace!("Created transient handle {}", file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Copy the handle's contents to `target`
    pub fn save_as(&self, target: &Path) -> io::Result<u64> {
        fs::copy(self.file.path(), target)
    }

    pub fn release(self) {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => tracing::trace!("Released transient handle {}", path.display()),
            Err(e) => tracing::warn!("Failed to release {}: {}", path.display(), e),
        }
    }
}

/// Saves downloads as `certificate-{id}.pdf` inside a directory
#[derive(Debug, Clone)]
pub struct FileSaver {
    dir: PathBuf,
}

impl FileSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn target_path(&self, id: &str) -> PathBuf {
        self.dir.join(download_file_name(id))
    }

    fn save_blocking(&self, id: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let handle = TransientHandle::create(&self.dir, bytes)?;
        let target = self.target_path(id);
        let saved = handle.save_as(&target);
        handle.release();

        let written = saved?;
        tracing::info!("Saved certificate {} to {} ({} bytes)", id, target.display(), written);
        Ok(target)
    }
}

#[async_trait]
impl DownloadSink for FileSaver {
    /// Runs the file work on the blocking pool
    async fn save(&self, id: &str, bytes: Vec<u8>) -> io::Result<PathBuf> {
        let saver = self.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || saver.save_blocking(&id, &bytes))
            .await
            .map_err(io::Error::other)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leftover_parts(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("part"))
            .collect()
    }

    #[test]
    fn test_download_file_name_sanitized() {
        assert_eq!(download_file_name("abc-123"), "certificate-abc-123.pdf");
        assert_eq!(download_file_name("../etc/x"), "certificate-___etc_x.pdf");
    }

    #[tokio::test]
    async fn test_save_writes_target_and_releases_handle() {
        let tmp = tempfile::tempdir().unwrap();
        let saver = FileSaver::new(tmp.path().join("downloads"));

        let path = saver.save("c1", b"%PDF data".to_vec()).await.unwrap();
        assert_eq!(path, saver.target_path("c1"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF data");
        assert!(leftover_parts(saver.dir()).is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_still_releases_handle() {
        let tmp = tempfile::tempdir().unwrap();
        let saver = FileSaver::new(tmp.path());
        // A directory in the way makes the copy fail after the handle exists
        fs::create_dir(saver.target_path("c1")).unwrap();

        assert!(saver.save("c1", b"bytes".to_vec()).await.is_err());
        assert!(leftover_parts(tmp.path()).is_empty());
    }

    #[test]
    fn test_dropped_handle_is_removed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = {
            let handle = TransientHandle::create(tmp.path(), b"x").unwrap();
            assert!(handle.path().exists());
            handle.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
