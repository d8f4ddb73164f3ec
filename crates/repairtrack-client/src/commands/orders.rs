use repairtrack_shared::{NewServiceOrder, OrderDraft, OrderPatch, ServiceOrder, ValidationError};
use tracing::info;
use uuid::Uuid;

use crate::app::App;
use crate::error::{AppError, AppResult};

impl App {
    /// Validate `draft` and store it as a new, active order.
    pub async fn create_service_order(&mut self, draft: &OrderDraft) -> AppResult<ServiceOrder> {
        let result = self.insert_order(draft).await;
        self.settle("Could not create service order", result)
    }

    async fn insert_order(&mut self, draft: &OrderDraft) -> AppResult<ServiceOrder> {
        if draft.actual_return_date.is_some() {
            return Err(ValidationError::ActualReturnOnNewOrder.into());
        }
        let fields = draft.validate(self.now())?;
        self.ensure_provider(fields.service_provider_id)?;

        let stored = self
            .persistence
            .insert_order(NewServiceOrder {
                fields,
                archived: false,
            })
            .await?;
        let order = self.with_provider_name(stored);

        info!(
            order_id = %order.id,
            number = %order.service_order_number,
            status = %order.status.as_str(),
            "Service order created"
        );
        self.store.insert_order(order.clone());
        self.notify_success(
            "Service order created",
            format!("Order {} was saved.", order.service_order_number),
        );
        Ok(order)
    }

    /// Overwrite every editable field of order `id` and recompute its status.
    /// The archived flag is left alone.
    pub async fn update_service_order(
        &mut self,
        id: Uuid,
        draft: &OrderDraft,
    ) -> AppResult<ServiceOrder> {
        let result = self.write_order(id, draft).await;
        self.settle("Could not update service order", result)
    }

    async fn write_order(&mut self, id: Uuid, draft: &OrderDraft) -> AppResult<ServiceOrder> {
        self.ensure_order(id)?;
        let fields = draft.validate(self.now())?;
        self.ensure_provider(fields.service_provider_id)?;

        let stored = self
            .persistence
            .update_order(id, OrderPatch::Fields(fields))
            .await?;
        let order = self.with_provider_name(stored);

        info!(order_id = %id, status = %order.status.as_str(), "Service order updated");
        self.store.replace_order(order.clone());
        self.notify_success(
            "Service order updated",
            format!("Order {} was saved.", order.service_order_number),
        );
        Ok(order)
    }

    /// Flip the archived flag. Nothing else changes, status included.
    pub async fn archive_toggle(&mut self, id: Uuid) -> AppResult<ServiceOrder> {
        let result = self.flip_archived(id).await;
        self.settle("Could not change archive state", result)
    }

    async fn flip_archived(&mut self, id: Uuid) -> AppResult<ServiceOrder> {
        let archived = !self.ensure_order(id)?.archived;
        let stored = self
            .persistence
            .update_order(id, OrderPatch::Archived(archived))
            .await?;
        let order = self.with_provider_name(stored);

        info!(order_id = %id, archived, "Service order archive state changed");
        self.store.replace_order(order.clone());
        let title = if archived {
            "Service order archived"
        } else {
            "Service order restored"
        };
        self.notify_success(title, format!("Order {}", order.service_order_number));
        Ok(order)
    }

    pub async fn delete_service_order(&mut self, id: Uuid) -> AppResult<()> {
        let result = self.remove_order(id).await;
        self.settle("Could not delete service order", result)
    }

    async fn remove_order(&mut self, id: Uuid) -> AppResult<()> {
        let number = self.ensure_order(id)?.service_order_number.clone();
        self.persistence.delete_order(id).await?;

        info!(order_id = %id, "Service order deleted");
        self.store.remove_order(id);
        self.notify_success("Service order deleted", format!("Order {number} was removed."));
        Ok(())
    }

    fn ensure_order(&self, id: Uuid) -> AppResult<&ServiceOrder> {
        self.store.order(id).ok_or(AppError::UnknownOrder(id))
    }

    fn ensure_provider(&self, id: Uuid) -> AppResult<()> {
        match self.store.provider(id) {
            Some(_) => Ok(()),
            None => Err(AppError::UnknownProvider(id)),
        }
    }
}
