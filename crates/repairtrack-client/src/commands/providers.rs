use repairtrack_shared::{OrderFilter, ProviderDraft, ServiceProvider};
use tracing::info;
use uuid::Uuid;

use crate::app::App;
use crate::error::{AppError, AppResult};

impl App {
    pub async fn create_service_provider(
        &mut self,
        draft: &ProviderDraft,
    ) -> AppResult<ServiceProvider> {
        let result = self.insert_provider(draft).await;
        self.settle("Could not create service provider", result)
    }

    async fn insert_provider(&mut self, draft: &ProviderDraft) -> AppResult<ServiceProvider> {
        let draft = draft.validate()?;
        let provider = self.persistence.insert_provider(draft).await?;

        info!(provider_id = %provider.id, name = %provider.name, "Service provider created");
        self.store.insert_provider(provider.clone());
        self.notify_success(
            "Service provider created",
            format!("{} was added.", provider.name),
        );
        Ok(provider)
    }

    /// Save provider `id`. A new name is propagated to the cached display
    /// name of every in-memory order that references it.
    pub async fn update_service_provider(
        &mut self,
        id: Uuid,
        draft: &ProviderDraft,
    ) -> AppResult<ServiceProvider> {
        let result = self.write_provider(id, draft).await;
        self.settle("Could not update service provider", result)
    }

    async fn write_provider(
        &mut self,
        id: Uuid,
        draft: &ProviderDraft,
    ) -> AppResult<ServiceProvider> {
        if self.store.provider(id).is_none() {
            return Err(AppError::UnknownProvider(id));
        }
        let draft = draft.validate()?;
        let provider = self.persistence.update_provider(id, draft).await?;

        info!(provider_id = %id, name = %provider.name, "Service provider updated");
        self.store.replace_provider(provider.clone());
        self.notify_success(
            "Service provider updated",
            format!("{} was saved.", provider.name),
        );
        Ok(provider)
    }

    /// Delete provider `id` unless orders still reference it. Dependents are
    /// looked up through the persistence collaborator, not the in-memory
    /// snapshot, so archived and not-yet-loaded orders count too.
    pub async fn delete_service_provider(&mut self, id: Uuid) -> AppResult<()> {
        let result = self.remove_provider(id).await;
        self.settle("Could not delete service provider", result)
    }

    async fn remove_provider(&mut self, id: Uuid) -> AppResult<()> {
        let name = match self.store.provider(id) {
            Some(p) => p.name.clone(),
            None => return Err(AppError::UnknownProvider(id)),
        };

        let dependents = self
            .persistence
            .list_orders(OrderFilter::by_provider(id))
            .await?;
        if !dependents.is_empty() {
            info!(
                provider_id = %id,
                dependents = dependents.len(),
                "Provider delete blocked by service orders"
            );
            return Err(AppError::HasDependents {
                provider_id: id,
                orders: dependents,
            });
        }

        self.persistence.delete_provider(id).await?;

        info!(provider_id = %id, "Service provider deleted");
        self.store.remove_provider(id);
        self.notify_success("Service provider deleted", format!("{name} was removed."));
        Ok(())
    }
}
