//! Domain model structs.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! to a persistence backend or printed as JSON by the CLI.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::Schedule;
use crate::types::Status;

// ---------------------------------------------------------------------------
// Service order
// ---------------------------------------------------------------------------

/// Equipment sent to a provider for repair, tracked from departure to return.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceOrder {
    /// Assigned by the persistence backend on insert.
    pub id: Uuid,
    pub service_order_number: String,
    pub client_name: String,
    pub description: Option<String>,
    pub service_provider_id: Uuid,
    /// Display name of the provider, merged in for presentation. Never written
    /// back as part of the order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_provider_name: Option<String>,
    pub departure_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    /// Whole days between departure and expected return.
    pub estimated_duration: u32,
    /// Computed at the last create/update, not live.
    pub status: Status,
    pub notes: Option<String>,
    /// Public URIs of uploaded photos, in upload completion order.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

impl ServiceOrder {
    /// Overwrite every user-editable field (and status) with `fields`.
    pub fn apply(&mut self, fields: OrderFields) {
        self.service_order_number = fields.service_order_number;
        self.client_name = fields.client_name;
        self.description = fields.description;
        if self.service_provider_id != fields.service_provider_id {
            self.service_provider_name = None;
        }
        self.service_provider_id = fields.service_provider_id;
        self.departure_date = fields.departure_date;
        self.expected_return_date = fields.expected_return_date;
        self.actual_return_date = fields.actual_return_date;
        self.estimated_duration = fields.estimated_duration;
        self.status = fields.status;
        self.notes = fields.notes;
        self.images = fields.images;
    }

    /// Provider display name, or the raw id when it has not been resolved.
    pub fn provider_label(&self) -> String {
        self.service_provider_name
            .clone()
            .unwrap_or_else(|| self.service_provider_id.to_string())
    }
}

/// The validated, writable part of a service order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderFields {
    pub service_order_number: String,
    pub client_name: String,
    pub description: Option<String>,
    pub service_provider_id: Uuid,
    pub departure_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub estimated_duration: u32,
    pub status: Status,
    pub notes: Option<String>,
    pub images: Vec<String>,
}

/// Insert payload. The backend assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewServiceOrder {
    #[serde(flatten)]
    pub fields: OrderFields,
    pub archived: bool,
}

/// Unvalidated form output for a service order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderDraft {
    pub service_order_number: String,
    pub client_name: String,
    pub description: Option<String>,
    pub service_provider_id: Option<Uuid>,
    pub schedule: Schedule,
    pub actual_return_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub images: Vec<String>,
}

impl OrderDraft {
    /// An empty draft departing on `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            service_order_number: String::new(),
            client_name: String::new(),
            description: None,
            service_provider_id: None,
            schedule: Schedule::starting(today),
            actual_return_date: None,
            notes: None,
            images: Vec::new(),
        }
    }

    /// A draft pre-filled from a stored order.
    pub fn from_order(order: &ServiceOrder) -> Self {
        Self {
            service_order_number: order.service_order_number.clone(),
            client_name: order.client_name.clone(),
            description: order.description.clone(),
            service_provider_id: Some(order.service_provider_id),
            schedule: Schedule::from_parts(
                order.departure_date,
                order.expected_return_date,
                order.estimated_duration,
            ),
            actual_return_date: order.actual_return_date,
            notes: order.notes.clone(),
            images: order.images.clone(),
        }
    }
}

/// Partial update of a stored order. Last write wins; there is no version
/// check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OrderPatch {
    /// Full edit-form submission.
    Fields(OrderFields),
    /// Archive toggle. Touches nothing else, status included.
    Archived(bool),
}

/// Equality filters for listing orders.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderFilter {
    pub service_provider_id: Option<Uuid>,
    pub archived: Option<bool>,
}

impl OrderFilter {
    pub fn by_provider(id: Uuid) -> Self {
        Self {
            service_provider_id: Some(id),
            archived: None,
        }
    }

    pub fn matches(&self, order: &ServiceOrder) -> bool {
        self.service_provider_id
            .map_or(true, |id| order.service_provider_id == id)
            && self.archived.map_or(true, |a| order.archived == a)
    }
}

// ---------------------------------------------------------------------------
// Service provider
// ---------------------------------------------------------------------------

/// The external party performing the repair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceProvider {
    pub id: Uuid,
    pub name: String,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ServiceProvider {
    pub fn apply(&mut self, draft: ProviderDraft) {
        self.name = draft.name;
        self.contact = draft.contact;
        self.phone = draft.phone;
        self.email = draft.email;
        self.address = draft.address;
    }
}

/// Provider form output, also used as the insert/update payload once
/// validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderDraft {
    pub name: String,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<&ServiceProvider> for ProviderDraft {
    fn from(p: &ServiceProvider) -> Self {
        Self {
            name: p.name.clone(),
            contact: p.contact.clone(),
            phone: p.phone.clone(),
            email: p.email.clone(),
            address: p.address.clone(),
        }
    }
}
