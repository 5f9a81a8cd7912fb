//! Video file handed to `POST /upload`

use clipper_errors::{Error, NetworkError};
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use std::path::{Path, PathBuf};
use tokio_util::io::ReaderStream;

/// A local video to upload, streamed from disk when sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    path: PathBuf,
    file_name: String,
    size: u64,
}

impl UploadFile {
    /// Stat `path` and capture what the multipart part needs
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not a regular file.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| upload_source_error(path, &e.to_string()))?;
        if !metadata.is_file() {
            return Err(upload_source_error(path, "not a regular file"));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.mp4")
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            size: metadata.len(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// MIME type guessed from the extension
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("mp4") => "video/mp4",
            Some("mov") => "video/quicktime",
            Some("mkv") => "video/x-matroska",
            Some("webm") => "video/webm",
            _ => "application/octet-stream",
        }
    }

    /// Build the form with the video under the `file` field
    pub(crate) async fn to_form(&self) -> Result<Form, Error> {
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| upload_source_error(&self.path, &e.to_string()))?;
        let body = Body::wrap_stream(ReaderStream::new(file));
        let part = Part::stream_with_length(body, self.size)
            .file_name(self.file_name.clone())
            .mime_str(self.mime_type())
            .map_err(|e| upload_source_error(&self.path, &e.to_string()))?;
        Ok(Form::new().part("file", part))
    }
}

fn upload_source_error(path: &Path, message: &str) -> Error {
    NetworkError::UploadSource {
        path: path.display().to_string(),
        message: message.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_path_captures_name_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Stream.MOV");
        tokio::fs::write(&path, b"not really a video").await.unwrap();

        let upload = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name(), "Stream.MOV");
        assert_eq!(upload.size(), 18);
        assert_eq!(upload.mime_type(), "video/quicktime");
    }

    #[tokio::test]
    async fn test_missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = UploadFile::from_path(dir.path().join("gone.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Network(NetworkError::UploadSource { .. })
        ));
    }

    #[tokio::test]
    async fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(UploadFile::from_path(dir.path()).await.is_err());
    }
}
