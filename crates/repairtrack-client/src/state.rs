//! In-memory view of the persisted collections.
//!
//! The [`EntityStore`] is owned by [`App`](crate::app::App) and only changes
//! after a collaborator call has succeeded, either by a full
//! [`replace_all`](EntityStore::replace_all) on refresh or by one of the
//! in-place helpers below.

use chrono::{DateTime, Utc};
use repairtrack_shared::{ServiceOrder, ServiceProvider};
use uuid::Uuid;

#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    /// Newest first, as listed by the backend. New orders are prepended.
    orders: Vec<ServiceOrder>,
    providers: Vec<ServiceProvider>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[ServiceOrder] {
        &self.orders
    }

    pub fn providers(&self) -> &[ServiceProvider] {
        &self.providers
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn order(&self, id: Uuid) -> Option<&ServiceOrder> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn provider(&self, id: Uuid) -> Option<&ServiceProvider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn provider_name(&self, id: Uuid) -> Option<&str> {
        self.provider(id).map(|p| p.name.as_str())
    }

    /// In-memory orders that reference `provider_id`.
    pub fn orders_for_provider(&self, provider_id: Uuid) -> impl Iterator<Item = &ServiceOrder> {
        self.orders
            .iter()
            .filter(move |o| o.service_provider_id == provider_id)
    }

    /// Swap in a fresh snapshot, resolving provider names on every order.
    pub fn replace_all(
        &mut self,
        mut orders: Vec<ServiceOrder>,
        providers: Vec<ServiceProvider>,
        at: DateTime<Utc>,
    ) {
        for order in &mut orders {
            if let Some(p) = providers.iter().find(|p| p.id == order.service_provider_id) {
                order.service_provider_name = Some(p.name.clone());
            }
        }
        self.orders = orders;
        self.providers = providers;
        self.refreshed_at = Some(at);
    }

    pub fn insert_order(&mut self, order: ServiceOrder) {
        self.orders.insert(0, order);
    }

    /// Replace the order with the same id. Returns `false` if none matched.
    pub fn replace_order(&mut self, order: ServiceOrder) -> bool {
        match self.orders.iter_mut().find(|o| o.id == order.id) {
            Some(slot) => {
                *slot = order;
                true
            }
            None => false,
        }
    }

    pub fn remove_order(&mut self, id: Uuid) -> Option<ServiceOrder> {
        let idx = self.orders.iter().position(|o| o.id == id)?;
        Some(self.orders.remove(idx))
    }

    /// Add a provider, keeping the list sorted by name.
    pub fn insert_provider(&mut self, provider: ServiceProvider) {
        let idx = self
            .providers
            .partition_point(|p| p.name.to_lowercase() <= provider.name.to_lowercase());
        self.providers.insert(idx, provider);
    }

    /// Replace the provider with the same id and refresh the display name on
    /// orders that reference it.
    pub fn replace_provider(&mut self, provider: ServiceProvider) -> bool {
        let Some(idx) = self.providers.iter().position(|p| p.id == provider.id) else {
            return false;
        };
        for order in self
            .orders
            .iter_mut()
            .filter(|o| o.service_provider_id == provider.id)
        {
            order.service_provider_name = Some(provider.name.clone());
        }
        self.providers.remove(idx);
        self.insert_provider(provider);
        true
    }

    pub fn remove_provider(&mut self, id: Uuid) -> Option<ServiceProvider> {
        let idx = self.providers.iter().position(|p| p.id == id)?;
        Some(self.providers.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{order, provider};

    #[test]
    fn replace_all_resolves_names() {
        let alpha = provider("Alpha");
        let mut o = order(alpha.id, "1", false);
        o.service_provider_name = None;

        let mut store = EntityStore::new();
        store.replace_all(vec![o.clone()], vec![alpha], Utc::now());

        assert_eq!(
            store.order(o.id).unwrap().service_provider_name.as_deref(),
            Some("Alpha")
        );
        assert!(store.refreshed_at().is_some());
    }

    #[test]
    fn providers_stay_sorted() {
        let mut store = EntityStore::new();
        store.insert_provider(provider("charlie"));
        store.insert_provider(provider("Alpha"));
        store.insert_provider(provider("bravo"));

        let names: Vec<_> = store.providers().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "bravo", "charlie"]);
    }

    #[test]
    fn renaming_provider_updates_orders() {
        let alpha = provider("Alpha");
        let mut store = EntityStore::new();
        store.replace_all(
            vec![order(alpha.id, "1", false), order(alpha.id, "2", true)],
            vec![alpha.clone()],
            Utc::now(),
        );

        let mut renamed = alpha.clone();
        renamed.name = "Zulu Repairs".into();
        assert!(store.replace_provider(renamed));

        assert!(store
            .orders()
            .iter()
            .all(|o| o.service_provider_name.as_deref() == Some("Zulu Repairs")));
        assert_eq!(store.provider_name(alpha.id), Some("Zulu Repairs"));
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut store = EntityStore::new();
        let ghost = order(Uuid::new_v4(), "9", false);
        assert!(!store.replace_order(ghost.clone()));
        assert!(store.remove_order(ghost.id).is_none());
        assert!(!store.replace_provider(provider("ghost")));
    }
}
