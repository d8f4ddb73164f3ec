//! Client configuration loaded from environment variables.
//!
//! Every setting has a default under the platform data directory, so the
//! binary runs with zero configuration.

use std::path::{Path, PathBuf};

use repairtrack_shared::constants::MAX_IMAGE_SIZE;
use repairtrack_store::{Database, ImageStore, StoreError};

use crate::backend::LocalBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// SQLite database file.
    /// Env: `REPAIRTRACK_DB_PATH`
    /// Default: `<data dir>/repairtrack.db`
    pub db_path: PathBuf,

    /// Directory uploaded photos are written to.
    /// Env: `REPAIRTRACK_IMAGE_DIR`
    /// Default: `<data dir>/images`
    pub image_dir: PathBuf,

    /// Base URL photos are served from. When unset, `file://` URIs into
    /// `image_dir` are stored instead.
    /// Env: `REPAIRTRACK_PUBLIC_URL`
    pub public_url: Option<String>,

    /// Maximum photo size in bytes.
    /// Env: `REPAIRTRACK_MAX_IMAGE_SIZE`
    /// Default: 10 MiB
    pub max_image_size: usize,
}

impl ClientConfig {
    /// Defaults rooted at `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            db_path: data_dir.join("repairtrack.db"),
            image_dir: data_dir.join("images"),
            public_url: None,
            max_image_size: MAX_IMAGE_SIZE,
        }
    }

    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = match repairtrack_store::database::default_data_dir() {
            Ok(dir) => dir,
            Err(e) => {
                tracing::warn!(error = %e, "No platform data directory, using ./data");
                PathBuf::from("./data")
            }
        };
        let mut config = Self::in_dir(&data_dir);

        if let Some(path) = lookup("REPAIRTRACK_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }

        if let Some(path) = lookup("REPAIRTRACK_IMAGE_DIR") {
            config.image_dir = PathBuf::from(path);
        }

        if let Some(url) = lookup("REPAIRTRACK_PUBLIC_URL") {
            if !url.trim().is_empty() {
                config.public_url = Some(url.trim().to_string());
            }
        }

        if let Some(val) = lookup("REPAIRTRACK_MAX_IMAGE_SIZE") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.max_image_size = n,
                _ => tracing::warn!(
                    value = %val,
                    "Invalid REPAIRTRACK_MAX_IMAGE_SIZE, using default"
                ),
            }
        }

        // RUST_LOG is read by tracing-subscriber's EnvFilter directly.

        config
    }

    /// Open the database and image directory this configuration points at.
    pub async fn open_backend(&self) -> Result<LocalBackend, StoreError> {
        let db = Database::open_at(&self.db_path)?;
        let images = match &self.public_url {
            Some(url) => {
                ImageStore::new(self.image_dir.clone(), url.clone(), self.max_image_size).await?
            }
            None => ImageStore::local(self.image_dir.clone(), self.max_image_size).await?,
        };
        Ok(LocalBackend::new(db, images))
    }
}
