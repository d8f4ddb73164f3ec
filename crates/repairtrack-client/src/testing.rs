//! Test doubles: an in-memory backend that records every call, and a
//! notification sink that keeps what it receives.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{NaiveDate, Utc};
use repairtrack_shared::{
    NewServiceOrder, OrderFilter, OrderPatch, ProviderDraft, ServiceOrder, ServiceProvider, Status,
};
use uuid::Uuid;

use crate::app::App;
use crate::backend::{BackendResult, ObjectStorage, Persistence};
use crate::error::BackendError;
use crate::notify::{Notification, NotificationSink, Severity};

/// Record of a collaborator call, for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendOp {
    InsertOrder,
    ListOrders(OrderFilter),
    UpdateOrder(Uuid, OrderPatch),
    DeleteOrder(Uuid),
    InsertProvider,
    ListProviders,
    UpdateProvider(Uuid),
    DeleteProvider(Uuid),
    Upload(String),
}

impl BackendOp {
    pub fn is_write(&self) -> bool {
        !matches!(self, BackendOp::ListOrders(_) | BackendOp::ListProviders)
    }
}

#[derive(Default)]
struct Tables {
    orders: Vec<ServiceOrder>,
    providers: Vec<ServiceProvider>,
}

/// In-memory collaborator with call tracing and failure injection.
#[derive(Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
    ops: Mutex<Vec<BackendOp>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn ops(&self) -> Vec<BackendOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<BackendOp> {
        self.ops().into_iter().filter(BackendOp::is_write).collect()
    }

    pub fn clear_ops(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// Make every subsequent write fail with `Unavailable`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn stored_orders(&self) -> Vec<ServiceOrder> {
        self.tables.lock().unwrap().orders.clone()
    }

    /// Seed a row directly, bypassing the op log.
    pub fn seed_provider(&self, provider: ServiceProvider) {
        self.tables.lock().unwrap().providers.push(provider);
    }

    pub fn seed_order(&self, order: ServiceOrder) {
        self.tables.lock().unwrap().orders.insert(0, order);
    }

    fn record(&self, op: BackendOp) -> BackendResult<()> {
        let write = op.is_write();
        self.ops.lock().unwrap().push(op);
        let flag = if write { &self.fail_writes } else { &self.fail_reads };
        if flag.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("injected failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Persistence for MemoryBackend {
    async fn insert_order(&self, order: NewServiceOrder) -> BackendResult<ServiceOrder> {
        self.record(BackendOp::InsertOrder)?;
        let mut stored = ServiceOrder {
            id: Uuid::new_v4(),
            service_order_number: order.fields.service_order_number.clone(),
            client_name: order.fields.client_name.clone(),
            description: None,
            service_provider_id: order.fields.service_provider_id,
            service_provider_name: None,
            departure_date: order.fields.departure_date,
            expected_return_date: order.fields.expected_return_date,
            actual_return_date: None,
            estimated_duration: 0,
            status: order.fields.status,
            notes: None,
            images: Vec::new(),
            archived: order.archived,
            created_at: Utc::now(),
        };
        stored.apply(order.fields);
        self.tables.lock().unwrap().orders.insert(0, stored.clone());
        Ok(stored)
    }

    async fn list_orders(&self, filter: OrderFilter) -> BackendResult<Vec<ServiceOrder>> {
        self.record(BackendOp::ListOrders(filter))?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .orders
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect())
    }

    async fn update_order(&self, id: Uuid, patch: OrderPatch) -> BackendResult<ServiceOrder> {
        self.record(BackendOp::UpdateOrder(id, patch.clone()))?;
        let mut tables = self.tables.lock().unwrap();
        let order = tables
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        match patch {
            OrderPatch::Fields(fields) => order.apply(fields),
            OrderPatch::Archived(archived) => order.archived = archived,
        }
        Ok(order.clone())
    }

    async fn delete_order(&self, id: Uuid) -> BackendResult<()> {
        self.record(BackendOp::DeleteOrder(id))?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.orders.len();
        tables.orders.retain(|o| o.id != id);
        if tables.orders.len() == before {
            return Err(BackendError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn insert_provider(&self, draft: ProviderDraft) -> BackendResult<ServiceProvider> {
        self.record(BackendOp::InsertProvider)?;
        let mut stored = provider("");
        stored.apply(draft);
        self.tables.lock().unwrap().providers.push(stored.clone());
        Ok(stored)
    }

    async fn list_providers(&self) -> BackendResult<Vec<ServiceProvider>> {
        self.record(BackendOp::ListProviders)?;
        Ok(self.tables.lock().unwrap().providers.clone())
    }

    async fn update_provider(
        &self,
        id: Uuid,
        draft: ProviderDraft,
    ) -> BackendResult<ServiceProvider> {
        self.record(BackendOp::UpdateProvider(id))?;
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .providers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        stored.apply(draft);
        Ok(stored.clone())
    }

    async fn delete_provider(&self, id: Uuid) -> BackendResult<()> {
        self.record(BackendOp::DeleteProvider(id))?;
        let mut tables = self.tables.lock().unwrap();
        tables.providers.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for MemoryBackend {
    async fn upload(&self, file_name: &str, data: Bytes) -> BackendResult<String> {
        self.record(BackendOp::Upload(file_name.to_string()))?;
        if file_name.starts_with("slow") {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
        Ok(format!("mem://{}/{}", data.len(), file_name))
    }
}

/// Keeps every notification it receives.
#[derive(Default)]
pub struct RecordingSink {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().unwrap().last().cloned()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

pub fn provider(name: &str) -> ServiceProvider {
    ServiceProvider {
        id: Uuid::new_v4(),
        name: name.to_string(),
        contact: None,
        phone: None,
        email: None,
        address: None,
        created_at: Utc::now(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn order(provider_id: Uuid, number: &str, archived: bool) -> ServiceOrder {
    ServiceOrder {
        id: Uuid::new_v4(),
        service_order_number: number.to_string(),
        client_name: format!("Client {number}"),
        description: None,
        service_provider_id: provider_id,
        service_provider_name: None,
        departure_date: date(2024, 1, 1),
        expected_return_date: date(2024, 1, 6),
        actual_return_date: None,
        estimated_duration: 5,
        status: Status::OnTime,
        notes: None,
        images: Vec::new(),
        archived,
        created_at: Utc::now(),
    }
}

/// An order with a given status, for view tests.
pub fn order_with_status(provider_id: Uuid, number: &str, status: Status, archived: bool) -> ServiceOrder {
    let mut o = order(provider_id, number, archived);
    o.status = status;
    o
}

/// App wired to a fresh memory backend and recording sink, with the clock
/// pinned to 2024-01-01T12:00Z.
pub fn app() -> (App, Arc<MemoryBackend>, Arc<RecordingSink>) {
    let backend = MemoryBackend::new();
    let sink = RecordingSink::new();
    let app = App::new(backend.clone(), backend.clone(), sink.clone()).with_clock(fixed_now);
    (app, backend, sink)
}

pub fn fixed_now() -> chrono::DateTime<Utc> {
    date(2024, 1, 1).and_hms_opt(12, 0, 0).unwrap().and_utc()
}
