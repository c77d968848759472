//! Filesystem-backed asset storage.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use vitrina_core::{AssetStore, AssetStoreError, Upload};

const MAX_EXTENSION_LEN: usize = 8;

/// Writes uploads under `root` and hands out references under
/// `public_base_url`, the prefix a static file server exposes `root` at.
///
/// ```text
/// upload("Front Photo.JPG")
///   → file:      {root}/2026/10/6f1c…e2.jpg
///   → reference: {public_base_url}/2026/10/6f1c…e2.jpg
/// ```
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsAssetStore {
    /// Initialise storage rooted at the provided directory, creating it if necessary.
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Result<Self, std::io::Error> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;

        Ok(FsAssetStore {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a reference issued by this store back to its file.
    pub fn absolute_path(&self, reference: &str) -> Result<PathBuf, AssetStoreError> {
        let foreign = || AssetStoreError::ForeignReference(reference.to_string());

        let stored_path = reference
            .strip_prefix(&self.public_base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rest| !rest.is_empty())
            .ok_or_else(foreign)?;

        let relative = Path::new(stored_path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(foreign());
        }

        Ok(self.root.join(relative))
    }

    fn build_stored_path(&self, file_name: &str) -> String {
        let now = Utc::now();
        let identifier = Uuid::new_v4();
        match extension(file_name) {
            Some(ext) => format!("{}/{:02}/{identifier}.{ext}", now.year(), now.month()),
            None => format!("{}/{:02}/{identifier}", now.year(), now.month()),
        }
    }
}

/// Lowercased ASCII-alphanumeric extension of the client's file name, if any.
fn extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .filter(|value| {
            !value.is_empty()
                && value.len() <= MAX_EXTENSION_LEN
                && value.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

fn io_error(err: std::io::Error) -> AssetStoreError {
    AssetStoreError::Io(err.to_string())
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn upload(&self, upload: &Upload) -> Result<String, AssetStoreError> {
        if upload.bytes.is_empty() {
            return Err(AssetStoreError::EmptyPayload);
        }

        let stored_path = self.build_stored_path(&upload.file_name);
        let absolute = self.root.join(&stored_path);

        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        fs::write(&absolute, &upload.bytes).await.map_err(io_error)?;

        debug!(path = %stored_path, size = upload.bytes.len(), "Stored asset");
        Ok(format!("{}/{stored_path}", self.public_base_url))
    }

    /// Missing files are treated as success.
    async fn delete(&self, reference: &str) -> Result<(), AssetStoreError> {
        let absolute = self.absolute_path(reference)?;

        match fs::remove_file(&absolute).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(err)),
        }
    }
}
