//! Download delivery: materializing the converted binary as a saved file.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::export::error::ExportError;

/// Where the finished print file lands. The pipeline drops its in-memory
/// copy right after delivery so repeated exports do not accumulate buffers.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    async fn deliver(&self, filename: &str, payload: &[u8]) -> Result<(), ExportError>;
}

/// Writes the file into a local downloads directory, creating it on demand.
pub struct FileDownloadSink {
    dir: PathBuf,
}

impl FileDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileDownloadSink { dir: dir.into() }
    }
}

#[async_trait]
impl DownloadSink for FileDownloadSink {
    async fn deliver(&self, filename: &str, payload: &[u8]) -> Result<(), ExportError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ExportError::Download(e.to_string()))?;
        let path = self.dir.join(filename);
        tokio::fs::write(&path, payload)
            .await
            .map_err(|e| ExportError::Download(e.to_string()))?;
        info!(path = %path.display(), bytes = payload.len(), "export file delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delivers_file_into_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileDownloadSink::new(dir.path().join("nested"));
        sink.deliver("out.pdf", b"%PDF-1.4 test").await.unwrap();

        let written = std::fs::read(dir.path().join("nested").join("out.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.4 test");
    }

    #[tokio::test]
    async fn test_unwritable_target_maps_to_download_error() {
        // A file where the directory should be makes create_dir_all fail.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"file, not a dir").unwrap();

        let sink = FileDownloadSink::new(&blocker);
        let err = sink.deliver("out.pdf", b"x").await.unwrap_err();
        assert!(matches!(err, ExportError::Download(_)));
    }
}
