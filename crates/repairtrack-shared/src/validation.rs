//! Draft validation. Turns form output into write payloads.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::models::{OrderDraft, OrderFields, ProviderDraft};
use crate::status::classify;

impl OrderDraft {
    /// Check required fields and the schedule, and stamp the status as of
    /// `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<OrderFields, ValidationError> {
        let service_order_number = required(&self.service_order_number, "service_order_number")?;
        let client_name = required(&self.client_name, "client_name")?;
        let service_provider_id = self
            .service_provider_id
            .ok_or(ValidationError::MissingProvider)?;
        let (expected_return_date, estimated_duration) = self.schedule.resolved()?;

        Ok(OrderFields {
            service_order_number,
            client_name,
            description: optional(&self.description),
            service_provider_id,
            departure_date: self.schedule.departure(),
            expected_return_date,
            actual_return_date: self.actual_return_date,
            estimated_duration,
            status: classify(expected_return_date, now),
            notes: optional(&self.notes),
            images: self.images.clone(),
        })
    }
}

impl ProviderDraft {
    /// Trim every field; blank optionals become `None`.
    pub fn validate(&self) -> Result<ProviderDraft, ValidationError> {
        Ok(ProviderDraft {
            name: required(&self.name, "name")?,
            contact: optional(&self.contact),
            phone: optional(&self.phone),
            email: optional(&self.email),
            address: optional(&self.address),
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use uuid::Uuid;

    use super::*;
    use crate::types::Status;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
    }

    fn filled() -> OrderDraft {
        let mut draft = OrderDraft::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        draft.service_order_number = " 1042 ".into();
        draft.client_name = "Metalurgica Sul".into();
        draft.service_provider_id = Some(Uuid::new_v4());
        draft.schedule.set_duration(10).unwrap();
        draft.notes = Some("   ".into());
        draft
    }

    #[test]
    fn valid_draft_gets_status() {
        let fields = filled().validate(now()).unwrap();
        assert_eq!(fields.service_order_number, "1042");
        assert_eq!(fields.estimated_duration, 10);
        assert_eq!(fields.status, Status::OnTime);
        assert_eq!(fields.notes, None);
    }

    #[test]
    fn provider_is_required() {
        let mut draft = filled();
        draft.service_provider_id = None;
        assert_eq!(draft.validate(now()), Err(ValidationError::MissingProvider));
    }

    #[test]
    fn client_name_is_required() {
        let mut draft = filled();
        draft.client_name = "  ".into();
        assert_eq!(
            draft.validate(now()),
            Err(ValidationError::MissingField("client_name"))
        );
    }

    #[test]
    fn return_date_is_required() {
        let mut draft = filled();
        draft.schedule = crate::dates::Schedule::starting(draft.schedule.departure());
        assert_eq!(draft.validate(now()), Err(ValidationError::MissingReturnDate));
    }

    #[test]
    fn provider_name_is_required() {
        let draft = ProviderDraft {
            name: " ".into(),
            ..Default::default()
        };
        assert_eq!(draft.validate(), Err(ValidationError::MissingField("name")));

        let draft = ProviderDraft {
            name: " Oficina Central ".into(),
            phone: Some("".into()),
            ..Default::default()
        };
        let clean = draft.validate().unwrap();
        assert_eq!(clean.name, "Oficina Central");
        assert_eq!(clean.phone, None);
    }
}
