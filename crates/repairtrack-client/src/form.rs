//! Create/edit forms.
//!
//! One form type per entity serves both creating and editing; which one it is
//! depends on whether it was opened on an existing record.

use chrono::NaiveDate;
use repairtrack_shared::{
    OrderDraft, ProviderDraft, Schedule, ServiceOrder, ServiceProvider, ValidationError,
};
use uuid::Uuid;

use crate::app::App;
use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderForm {
    id: Option<Uuid>,
    draft: OrderDraft,
}

impl OrderForm {
    /// Blank form departing on `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            id: None,
            draft: OrderDraft::new(today),
        }
    }

    pub fn edit(order: &ServiceOrder) -> Self {
        Self {
            id: Some(order.id),
            draft: OrderDraft::from_order(order),
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn schedule(&self) -> &Schedule {
        &self.draft.schedule
    }

    pub fn images(&self) -> &[String] {
        &self.draft.images
    }

    pub fn set_service_order_number(&mut self, number: impl Into<String>) {
        self.draft.service_order_number = number.into();
    }

    pub fn set_client_name(&mut self, name: impl Into<String>) {
        self.draft.client_name = name.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.draft.description = description;
    }

    pub fn set_provider(&mut self, provider_id: Uuid) {
        self.draft.service_provider_id = Some(provider_id);
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.draft.notes = notes;
    }

    pub fn set_departure(&mut self, departure: NaiveDate) -> Result<(), ValidationError> {
        self.draft.schedule.set_departure(departure)
    }

    pub fn set_duration(&mut self, days: i64) -> Result<(), ValidationError> {
        self.draft.schedule.set_duration(days)
    }

    pub fn set_duration_input(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.draft.schedule.set_duration_input(raw)
    }

    pub fn set_expected_return(&mut self, date: NaiveDate) -> Result<(), ValidationError> {
        self.draft.schedule.set_expected_return(date)
    }

    /// Only meaningful on records that already exist.
    pub fn set_actual_return(&mut self, date: Option<NaiveDate>) -> Result<(), ValidationError> {
        if self.is_new() && date.is_some() {
            return Err(ValidationError::ActualReturnOnNewOrder);
        }
        self.draft.actual_return_date = date;
        Ok(())
    }

    pub fn push_image(&mut self, uri: String) {
        self.draft.images.push(uri);
    }

    /// Drop the image at `index`, returning its URI.
    pub fn remove_image(&mut self, index: usize) -> Result<String, ValidationError> {
        if index >= self.draft.images.len() {
            return Err(ValidationError::NoSuchImage(index));
        }
        Ok(self.draft.images.remove(index))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderForm {
    id: Option<Uuid>,
    draft: ProviderDraft,
}

impl ProviderForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(provider: &ServiceProvider) -> Self {
        Self {
            id: Some(provider.id),
            draft: ProviderDraft::from(provider),
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn draft(&self) -> &ProviderDraft {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_contact(&mut self, contact: Option<String>) {
        self.draft.contact = contact;
    }

    pub fn set_phone(&mut self, phone: Option<String>) {
        self.draft.phone = phone;
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.draft.email = email;
    }

    pub fn set_address(&mut self, address: Option<String>) {
        self.draft.address = address;
    }
}

impl App {
    /// Create or update, depending on how the form was opened.
    pub async fn submit_order_form(&mut self, form: &OrderForm) -> AppResult<ServiceOrder> {
        match form.id() {
            None => self.create_service_order(form.draft()).await,
            Some(id) => self.update_service_order(id, form.draft()).await,
        }
    }

    pub async fn submit_provider_form(&mut self, form: &ProviderForm) -> AppResult<ServiceProvider> {
        match form.id() {
            None => self.create_service_provider(form.draft()).await,
            Some(id) => self.update_service_provider(id, form.draft()).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{app, date, order};

    #[test]
    fn new_form_defaults() {
        let form = OrderForm::new(date(2024, 3, 1));
        assert!(form.is_new());
        assert_eq!(form.schedule().departure(), date(2024, 3, 1));
        assert_eq!(form.schedule().expected_return(), None);
        assert!(form.images().is_empty());
    }

    #[test]
    fn actual_return_only_on_edit() {
        let mut form = OrderForm::new(date(2024, 3, 1));
        assert_eq!(
            form.set_actual_return(Some(date(2024, 3, 2))),
            Err(ValidationError::ActualReturnOnNewOrder)
        );
        assert_eq!(form.draft().actual_return_date, None);
        form.set_actual_return(None).unwrap();

        let mut edit = OrderForm::edit(&order(Uuid::new_v4(), "5", false));
        edit.set_actual_return(Some(date(2024, 1, 5))).unwrap();
        assert_eq!(edit.draft().actual_return_date, Some(date(2024, 1, 5)));
    }

    #[test]
    fn schedule_edits_flow_through() {
        let mut form = OrderForm::new(date(2024, 1, 1));
        form.set_duration(5).unwrap();
        assert_eq!(form.schedule().expected_return(), Some(date(2024, 1, 6)));
        form.set_expected_return(date(2024, 1, 11)).unwrap();
        assert_eq!(form.schedule().duration(), Some(10));
        assert!(form.set_duration_input("abc").is_err());
        assert_eq!(form.schedule().duration(), Some(10));
    }

    #[test]
    fn out_of_range_duration_is_a_form_error() {
        let mut form = OrderForm::new(date(2024, 1, 1));
        assert!(matches!(
            form.set_duration_input("200000000"),
            Err(ValidationError::DateOutOfRange { .. })
        ));
        assert_eq!(form.schedule().expected_return(), None);
    }

    #[test]
    fn image_list_edits() {
        let mut form = OrderForm::new(date(2024, 1, 1));
        form.push_image("a".into());
        form.push_image("b".into());
        assert_eq!(form.remove_image(0).unwrap(), "a");
        assert_eq!(form.images(), &["b".to_string()]);
        assert_eq!(form.remove_image(3), Err(ValidationError::NoSuchImage(3)));
    }

    #[tokio::test]
    async fn submit_routes_by_mode() {
        let (mut app, _, _) = app();

        let mut pform = ProviderForm::new();
        pform.set_name("Alpha");
        let alpha = app.submit_provider_form(&pform).await.unwrap();

        let mut form = OrderForm::new(app.today());
        form.set_service_order_number("100");
        form.set_client_name("Oficina Central");
        form.set_provider(alpha.id);
        form.set_duration(4).unwrap();
        let created = app.submit_order_form(&form).await.unwrap();
        assert_eq!(app.store().orders().len(), 1);

        let mut edit = OrderForm::edit(&created);
        edit.set_client_name("Oficina Norte");
        let updated = app.submit_order_form(&edit).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(app.store().orders().len(), 1);
        assert_eq!(app.store().order(created.id).unwrap().client_name, "Oficina Norte");

        let mut rename = ProviderForm::edit(&alpha);
        rename.set_name("Alpha Assistência");
        app.submit_provider_form(&rename).await.unwrap();
        assert_eq!(app.store().provider_name(alpha.id), Some("Alpha Assistência"));
    }
}
