//! Application controller.
//!
//! [`App`] owns the in-memory [`EntityStore`] and the collaborator handles.
//! Lifecycle operations live in [`crate::commands`] as further `impl App`
//! blocks.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use repairtrack_shared::constants::MAX_IMAGE_SIZE;
use repairtrack_shared::{OrderFilter, ServiceOrder, ServiceProvider};
use tracing::{debug, warn};

use crate::backend::{ObjectStorage, Persistence};
use crate::error::{AppError, AppResult};
use crate::notify::{Notification, NotificationSink};
use crate::state::EntityStore;

pub struct App {
    pub(crate) store: EntityStore,
    pub(crate) persistence: Arc<dyn Persistence>,
    pub(crate) storage: Arc<dyn ObjectStorage>,
    pub(crate) notifier: Arc<dyn NotificationSink>,
    clock: fn() -> DateTime<Utc>,
    pub(crate) max_image_size: usize,
}

impl App {
    pub fn new(
        persistence: Arc<dyn Persistence>,
        storage: Arc<dyn ObjectStorage>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store: EntityStore::new(),
            persistence,
            storage,
            notifier,
            clock: Utc::now,
            max_image_size: MAX_IMAGE_SIZE,
        }
    }

    /// Replace the wall clock used for status classification.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_max_image_size(mut self, max: usize) -> Self {
        self.max_image_size = max;
        self
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Today's date in UTC, the default departure on new forms.
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Re-fetch both collections. On failure the previous snapshot is kept.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let result = self.fetch_all().await;
        let (orders, providers) = self.settle("Could not load data", result)?;
        debug!(
            orders = orders.len(),
            providers = providers.len(),
            "Snapshot refreshed"
        );
        let at = self.now();
        self.store.replace_all(orders, providers, at);
        Ok(())
    }

    async fn fetch_all(&self) -> AppResult<(Vec<ServiceOrder>, Vec<ServiceProvider>)> {
        let providers = self.persistence.list_providers().await?;
        let orders = self.persistence.list_orders(OrderFilter::default()).await?;
        Ok((orders, providers))
    }

    pub(crate) fn notify_success(&self, title: &str, description: String) {
        self.notifier.notify(Notification::success(title, description));
    }

    /// Pass `result` through, emitting a notification when it failed.
    /// A blocked provider delete is reported as information, not an error.
    pub(crate) fn settle<T>(&self, title: &str, result: AppResult<T>) -> AppResult<T> {
        if let Err(e) = &result {
            let notification = match e {
                AppError::HasDependents { .. } => Notification::info(title, e.to_string()),
                _ => {
                    warn!(error = %e, "{title}");
                    Notification::error(title, e.to_string())
                }
            };
            self.notifier.notify(notification);
        }
        result
    }

    /// Fill in the cached provider name from the current snapshot.
    pub(crate) fn with_provider_name(&self, mut order: ServiceOrder) -> ServiceOrder {
        order.service_provider_name = self
            .store
            .provider_name(order.service_provider_id)
            .map(str::to_owned);
        order
    }
}
