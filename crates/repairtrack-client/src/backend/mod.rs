//! External collaborators the application drives.
//!
//! The application never talks to a database or file store directly; it goes
//! through these traits. [`local::LocalBackend`] implements them on top of
//! `repairtrack-store`.

pub mod local;

use async_trait::async_trait;
use bytes::Bytes;
use repairtrack_shared::{
    NewServiceOrder, OrderFilter, OrderPatch, ProviderDraft, ServiceOrder, ServiceProvider,
};
use uuid::Uuid;

use crate::error::BackendError;

pub use local::LocalBackend;

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Record persistence for both entity collections.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Insert one order; returns the stored record with its assigned id.
    async fn insert_order(&self, order: NewServiceOrder) -> BackendResult<ServiceOrder>;

    /// Orders matching `filter`, newest first.
    async fn list_orders(&self, filter: OrderFilter) -> BackendResult<Vec<ServiceOrder>>;

    async fn update_order(&self, id: Uuid, patch: OrderPatch) -> BackendResult<ServiceOrder>;

    async fn delete_order(&self, id: Uuid) -> BackendResult<()>;

    async fn insert_provider(&self, provider: ProviderDraft) -> BackendResult<ServiceProvider>;

    async fn list_providers(&self) -> BackendResult<Vec<ServiceProvider>>;

    async fn update_provider(
        &self,
        id: Uuid,
        provider: ProviderDraft,
    ) -> BackendResult<ServiceProvider>;

    async fn delete_provider(&self, id: Uuid) -> BackendResult<()>;
}

/// Photo storage. Returns a URI that can be displayed later.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, file_name: &str, data: Bytes) -> BackendResult<String>;
}
