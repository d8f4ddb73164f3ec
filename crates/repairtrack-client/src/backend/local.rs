//! SQLite + filesystem implementation of the collaborator traits.

use async_trait::async_trait;
use bytes::Bytes;
use repairtrack_shared::{
    NewServiceOrder, OrderFilter, OrderPatch, ProviderDraft, ServiceOrder, ServiceProvider,
};
use repairtrack_store::{Database, ImageStore};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{BackendResult, ObjectStorage, Persistence};
use crate::error::BackendError;

/// Local backend. Every call takes the connection lock, so requests are
/// applied one at a time in arrival order.
///
/// The rusqlite calls are synchronous and run on the calling task while the
/// lock is held. Move them onto `spawn_blocking` before sharing one backend
/// between concurrent sessions.
pub struct LocalBackend {
    db: Mutex<Database>,
    images: ImageStore,
}

impl LocalBackend {
    pub fn new(db: Database, images: ImageStore) -> Self {
        Self {
            db: Mutex::new(db),
            images,
        }
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }
}

#[async_trait]
impl Persistence for LocalBackend {
    async fn insert_order(&self, order: NewServiceOrder) -> BackendResult<ServiceOrder> {
        let db = self.db.lock().await;
        Ok(db.insert_order(&order)?)
    }

    async fn list_orders(&self, filter: OrderFilter) -> BackendResult<Vec<ServiceOrder>> {
        let db = self.db.lock().await;
        Ok(db.list_orders(&filter)?)
    }

    async fn update_order(&self, id: Uuid, patch: OrderPatch) -> BackendResult<ServiceOrder> {
        let db = self.db.lock().await;
        Ok(db.update_order(id, &patch)?)
    }

    async fn delete_order(&self, id: Uuid) -> BackendResult<()> {
        let db = self.db.lock().await;
        if !db.delete_order(id)? {
            return Err(BackendError::NotFound(format!("service order {id}")));
        }
        Ok(())
    }

    async fn insert_provider(&self, provider: ProviderDraft) -> BackendResult<ServiceProvider> {
        let db = self.db.lock().await;
        Ok(db.create_provider(&provider)?)
    }

    async fn list_providers(&self) -> BackendResult<Vec<ServiceProvider>> {
        let db = self.db.lock().await;
        Ok(db.list_providers()?)
    }

    async fn update_provider(
        &self,
        id: Uuid,
        provider: ProviderDraft,
    ) -> BackendResult<ServiceProvider> {
        let db = self.db.lock().await;
        Ok(db.update_provider(id, &provider)?)
    }

    async fn delete_provider(&self, id: Uuid) -> BackendResult<()> {
        let db = self.db.lock().await;
        if !db.delete_provider(id)? {
            return Err(BackendError::NotFound(format!("service provider {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for LocalBackend {
    async fn upload(&self, file_name: &str, data: Bytes) -> BackendResult<String> {
        Ok(self.images.upload(file_name, &data).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use repairtrack_shared::{OrderFields, Status};

    use super::*;

    async fn backend() -> (LocalBackend, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("rt.db")).unwrap();
        let images = ImageStore::local(dir.path().join("images"), 1024).await.unwrap();
        (LocalBackend::new(db, images), dir)
    }

    #[tokio::test]
    async fn round_trip_through_traits() {
        let (backend, _dir) = backend().await;

        let provider = backend
            .insert_provider(ProviderDraft {
                name: "Alpha".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        let order = backend
            .insert_order(NewServiceOrder {
                fields: OrderFields {
                    service_order_number: "77".into(),
                    client_name: "Padaria Boa Vista".into(),
                    description: None,
                    service_provider_id: provider.id,
                    departure_date: day(1),
                    expected_return_date: day(4),
                    actual_return_date: None,
                    estimated_duration: 3,
                    status: Status::Warning,
                    notes: None,
                    images: vec![],
                },
                archived: false,
            })
            .await
            .unwrap();

        let dependents = backend
            .list_orders(OrderFilter::by_provider(provider.id))
            .await
            .unwrap();
        assert_eq!(dependents, vec![order.clone()]);

        backend.delete_order(order.id).await.unwrap();
        assert!(matches!(
            backend.delete_order(order.id).await,
            Err(BackendError::NotFound(_))
        ));
        backend.delete_provider(provider.id).await.unwrap();
    }

    #[tokio::test]
    async fn upload_rejections_are_reported() {
        let (backend, _dir) = backend().await;
        let err = backend.upload("x.png", Bytes::new()).await.unwrap_err();
        assert!(matches!(err, BackendError::Rejected(_)));

        let url = backend
            .upload("x.png", Bytes::from_static(b"png"))
            .await
            .unwrap();
        assert!(url.starts_with("file://"));
    }
}
