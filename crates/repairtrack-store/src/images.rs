//! Filesystem object storage for order photos.
//!
//! Each upload is written as `<uuid>.<ext>` under the base directory and is
//! addressed by `<public_base_url>/<file name>`.

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, StoreError};

/// Verify that a resolved path stays within the expected base directory.
fn ensure_within(base: &Path, name: &str) -> Result<PathBuf> {
    let mut resolved = base.to_path_buf();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(c) => resolved.push(c),
            _ => return Err(StoreError::InvalidImageName(name.to_string())),
        }
    }
    if resolved.parent() != Some(base) {
        return Err(StoreError::InvalidImageName(name.to_string()));
    }
    Ok(resolved)
}

/// Lower-cased extension of the original file name, if it has a sane one.
fn extension_of(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    base_path: PathBuf,
    public_base_url: String,
    max_size: usize,
}

impl ImageStore {
    pub async fn new(base_path: PathBuf, public_base_url: String, max_size: usize) -> Result<Self> {
        fs::create_dir_all(&base_path).await?;

        info!(path = %base_path.display(), url = %public_base_url, "Image store initialized");

        Ok(Self {
            base_path,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            max_size,
        })
    }

    /// A store whose public URLs are `file://` URIs pointing into `base_path`.
    pub async fn local(base_path: PathBuf, max_size: usize) -> Result<Self> {
        let url = format!("file://{}", base_path.display());
        Self::new(base_path, url, max_size).await
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Store an image under a fresh name and return its public URI.
    ///
    /// `original_name` only contributes its extension.
    pub async fn upload(&self, original_name: &str, data: &[u8]) -> Result<String> {
        if data.is_empty() {
            return Err(StoreError::EmptyImage);
        }
        if data.len() > self.max_size {
            return Err(StoreError::ImageTooLarge {
                size: data.len(),
                max: self.max_size,
            });
        }

        let name = match extension_of(original_name) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let path = ensure_within(&self.base_path, &name)?;

        fs::write(&path, data).await?;

        debug!(name = %name, size = data.len(), "Stored image");
        Ok(self.public_url(&name))
    }

    /// Read an image back by the file name part of its URI.
    #[cfg(test)]
    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = ensure_within(&self.base_path, name)?;
        if !fs::try_exists(&path).await? {
            return Err(StoreError::NotFound);
        }
        Ok(fs::read(&path).await?)
    }

    pub fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.public_base_url, name)
    }

    /// File name part of a URI handed out by this store.
    #[cfg(test)]
    pub fn name_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(&self.public_base_url)?.strip_prefix('/')
    }
}
