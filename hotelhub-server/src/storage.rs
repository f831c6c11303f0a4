//! Upload storage - binary files on local disk
//!
//! Files land in a single directory keyed by their original filename.
//! A later upload with the same name replaces the earlier file; rows
//! that stored the old path then point at the new content.

use std::path::{Path, PathBuf};

use tokio::fs;

/// Default upload directory, relative to the working directory
pub const DEFAULT_UPLOAD_DIR: &str = "uploaded_images";

/// An uploaded file as received from a multipart form
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid filename: '{0}'")]
    InvalidFilename(String),
}

/// Local directory holding uploaded images
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it doesn't exist yet.
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Write an upload and return the stored path for persistence.
    pub async fn save(&self, upload: &Upload) -> Result<String, StorageError> {
        let name = sanitize_filename(&upload.filename)?;
        self.ensure_root().await?;

        let location = self.root.join(name);
        fs::write(&location, &upload.bytes).await?;
        tracing::debug!(path = %location.display(), bytes = upload.bytes.len(), "stored upload");

        Ok(location.to_string_lossy().into_owned())
    }

    /// Store several uploads in order.
    ///
    /// Stops at the first failure; files already written stay on disk.
    pub async fn save_all(&self, uploads: &[Upload]) -> Result<Vec<String>, StorageError> {
        let mut paths = Vec::with_capacity(uploads.len());
        for upload in uploads {
            paths.push(self.save(upload).await?);
        }
        Ok(paths)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_UPLOAD_DIR)
    }
}

/// Reduce a client supplied filename to its final path component.
pub fn sanitize_filename(raw: &str) -> Result<&str, StorageError> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(StorageError::InvalidFilename(raw.to_owned()));
    }
    Ok(name)
}
