use repairtrack_shared::{ProviderDraft, ServiceProvider};
use rusqlite::params;
use uuid::Uuid;

use crate::convert::{encode_timestamp, not_found, now, timestamp_at, uuid_at};
use crate::database::Database;
use crate::error::Result;

const PROVIDER_COLUMNS: &str = "id, name, contact, phone, email, address, created_at";

impl Database {
    /// Insert a provider and return the stored record with its new id.
    pub fn create_provider(&self, draft: &ProviderDraft) -> Result<ServiceProvider> {
        let provider = ServiceProvider {
            id: Uuid::new_v4(),
            name: draft.name.clone(),
            contact: draft.contact.clone(),
            phone: draft.phone.clone(),
            email: draft.email.clone(),
            address: draft.address.clone(),
            created_at: now(),
        };

        self.conn().execute(
            "INSERT INTO service_providers (id, name, contact, phone, email, address, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                provider.id.to_string(),
                provider.name,
                provider.contact,
                provider.phone,
                provider.email,
                provider.address,
                encode_timestamp(provider.created_at),
            ],
        )?;

        tracing::debug!(id = %provider.id, name = %provider.name, "provider inserted");
        Ok(provider)
    }

    pub fn get_provider(&self, id: Uuid) -> Result<ServiceProvider> {
        self.conn()
            .query_row(
                &format!("SELECT {PROVIDER_COLUMNS} FROM service_providers WHERE id = ?1"),
                params![id.to_string()],
                row_to_provider,
            )
            .map_err(not_found)
    }

    /// All providers, alphabetically.
    pub fn list_providers(&self) -> Result<Vec<ServiceProvider>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {PROVIDER_COLUMNS} FROM service_providers ORDER BY name COLLATE NOCASE ASC"
        ))?;
        let rows = stmt.query_map([], row_to_provider)?;
        let providers = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(providers)
    }

    /// Overwrite a provider's fields. Fails with `NotFound` for an unknown id.
    pub fn update_provider(&self, id: Uuid, draft: &ProviderDraft) -> Result<ServiceProvider> {
        let affected = self.conn().execute(
            "UPDATE service_providers
             SET name = ?2, contact = ?3, phone = ?4, email = ?5, address = ?6
             WHERE id = ?1",
            params![
                id.to_string(),
                draft.name,
                draft.contact,
                draft.phone,
                draft.email,
                draft.address,
            ],
        )?;
        if affected == 0 {
            return Err(crate::StoreError::NotFound);
        }
        self.get_provider(id)
    }

    // orders reference providers without cascade: deleting a referenced
    // provider fails with a foreign key error
    pub fn delete_provider(&self, id: Uuid) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM service_providers WHERE id = ?1", params![id.to_string()])?;
        Ok(affected > 0)
    }
}

fn row_to_provider(row: &rusqlite::Row<'_>) -> rusqlite::Result<ServiceProvider> {
    Ok(ServiceProvider {
        id: uuid_at(row, 0)?,
        name: row.get(1)?,
        contact: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        address: row.get(5)?,
        created_at: timestamp_at(row, 6)?,
    })
}
