use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::{FuturesUnordered, StreamExt};
use repairtrack_shared::ServiceOrder;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::app::App;
use crate::error::{AppError, AppResult};
use crate::form::OrderForm;
use crate::notify::Notification;

/// A photo picked for upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub data: Bytes,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self::new(name, data))
    }
}

fn check_image(name: &str, size: usize, max: usize) -> AppResult<()> {
    let reason = if size == 0 {
        "file is empty".to_string()
    } else if size > max {
        format!("{size} bytes exceeds the {max} byte limit")
    } else {
        return Ok(());
    };
    Err(AppError::ImageRejected {
        name: name.to_string(),
        reason,
    })
}

impl App {
    /// Upload every file concurrently. Results come back in completion
    /// order, and each upload reports its own notification.
    pub async fn upload_images(&self, files: Vec<ImageFile>) -> Vec<AppResult<String>> {
        let max = self.max_image_size;
        let mut pending = FuturesUnordered::new();

        for ImageFile { name, data } in files {
            let storage = Arc::clone(&self.storage);
            pending.push(async move {
                let outcome = match check_image(&name, data.len(), max) {
                    Ok(()) => storage.upload(&name, data).await.map_err(AppError::from),
                    Err(e) => Err(e),
                };
                (name, outcome)
            });
        }

        let mut results = Vec::with_capacity(pending.len());
        while let Some((name, outcome)) = pending.next().await {
            match &outcome {
                Ok(uri) => {
                    debug!(file = %name, uri = %uri, "Image uploaded");
                    self.notifier
                        .notify(Notification::success("Image uploaded", name));
                }
                Err(e) => {
                    warn!(file = %name, error = %e, "Image upload failed");
                    self.notifier
                        .notify(Notification::error("Image upload failed", e.to_string()));
                }
            }
            results.push(outcome);
        }
        results
    }

    /// Upload `files` and append the successful ones to order `id`.
    pub async fn attach_images(
        &mut self,
        id: Uuid,
        files: Vec<ImageFile>,
    ) -> AppResult<ServiceOrder> {
        let Some(order) = self.store.order(id).cloned() else {
            return self.settle("Could not attach images", Err(AppError::UnknownOrder(id)));
        };

        if files.is_empty() {
            return Ok(order);
        }
        let attempted = files.len();
        let uris: Vec<String> = self
            .upload_images(files)
            .await
            .into_iter()
            .filter_map(Result::ok)
            .collect();
        if uris.is_empty() {
            return self.settle(
                "Could not attach images",
                Err(AppError::NoImagesUploaded(attempted)),
            );
        }

        info!(order_id = %id, count = uris.len(), "Attaching images");
        let mut form = OrderForm::edit(&order);
        for uri in uris {
            form.push_image(uri);
        }
        self.submit_order_form(&form).await
    }

    /// Drop the image at `index` from order `id`. The stored file is kept.
    pub async fn remove_image(&mut self, id: Uuid, index: usize) -> AppResult<ServiceOrder> {
        let form = match self.store.order(id) {
            Some(order) => {
                let mut form = OrderForm::edit(order);
                form.remove_image(index).map(|_| form).map_err(AppError::from)
            }
            None => Err(AppError::UnknownOrder(id)),
        };
        let form = self.settle("Could not remove image", form)?;
        self.submit_order_form(&form).await
    }
}
