//! CRUD operations for service order records.

use repairtrack_shared::{NewServiceOrder, OrderFields, OrderFilter, OrderPatch, ServiceOrder, Status};
use rusqlite::params;
use uuid::Uuid;

use crate::convert::{
    date_at, encode_date, encode_timestamp, not_found, now, opt_date_at, timestamp_at, uuid_at,
};
use crate::database::Database;
use crate::error::{Result, StoreError};

/// Orders joined with the provider name, so every returned record carries its
/// display name.
const SELECT_ORDERS: &str = "
    SELECT o.id, o.service_order_number, o.client_name, o.description,
           o.service_provider_id, p.name,
           o.departure_date, o.expected_return_date, o.actual_return_date,
           o.estimated_duration, o.status, o.notes, o.images, o.archived, o.created_at
    FROM service_orders o
    LEFT JOIN service_providers p ON p.id = o.service_provider_id";

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new order. The id and creation time are assigned here.
    pub fn insert_order(&self, new: &NewServiceOrder) -> Result<ServiceOrder> {
        let id = Uuid::new_v4();
        let f = &new.fields;

        self.conn().execute(
            "INSERT INTO service_orders (
                id, service_order_number, client_name, description, service_provider_id,
                departure_date, expected_return_date, actual_return_date, estimated_duration,
                status, notes, images, archived, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                id.to_string(),
                f.service_order_number,
                f.client_name,
                f.description,
                f.service_provider_id.to_string(),
                encode_date(f.departure_date),
                encode_date(f.expected_return_date),
                f.actual_return_date.map(encode_date),
                f.estimated_duration,
                f.status.as_str(),
                f.notes,
                serde_json::to_string(&f.images)?,
                new.archived,
                encode_timestamp(now()),
            ],
        )?;

        tracing::debug!(%id, number = %f.service_order_number, "order inserted");
        self.get_order(id)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn get_order(&self, id: Uuid) -> Result<ServiceOrder> {
        self.conn()
            .query_row(
                &format!("{SELECT_ORDERS} WHERE o.id = ?1"),
                params![id.to_string()],
                row_to_order,
            )
            .map_err(not_found)
    }

    /// Orders matching `filter`, newest first.
    pub fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<ServiceOrder>> {
        let mut stmt = self.conn().prepare(&format!(
            "{SELECT_ORDERS}
             WHERE (?1 IS NULL OR o.service_provider_id = ?1)
               AND (?2 IS NULL OR o.archived = ?2)
             ORDER BY o.created_at DESC, o.rowid DESC"
        ))?;

        let rows = stmt.query_map(
            params![
                filter.service_provider_id.map(|id| id.to_string()),
                filter.archived,
            ],
            row_to_order,
        )?;

        let mut orders = Vec::new();
        for row in rows {
            orders.push(row?);
        }
        Ok(orders)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Apply a patch and return the stored result.
    pub fn update_order(&self, id: Uuid, patch: &OrderPatch) -> Result<ServiceOrder> {
        let affected = match patch {
            OrderPatch::Fields(f) => self.write_fields(id, f)?,
            OrderPatch::Archived(archived) => self.conn().execute(
                "UPDATE service_orders SET archived = ?2 WHERE id = ?1",
                params![id.to_string(), archived],
            )?,
        };
        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        self.get_order(id)
    }

    fn write_fields(&self, id: Uuid, f: &OrderFields) -> Result<usize> {
        let affected = self.conn().execute(
            "UPDATE service_orders SET
                service_order_number = ?2, client_name = ?3, description = ?4,
                service_provider_id = ?5, departure_date = ?6, expected_return_date = ?7,
                actual_return_date = ?8, estimated_duration = ?9, status = ?10,
                notes = ?11, images = ?12
             WHERE id = ?1",
            params![
                id.to_string(),
                f.service_order_number,
                f.client_name,
                f.description,
                f.service_provider_id.to_string(),
                encode_date(f.departure_date),
                encode_date(f.expected_return_date),
                f.actual_return_date.map(encode_date),
                f.estimated_duration,
                f.status.as_str(),
                f.notes,
                serde_json::to_string(&f.images)?,
            ],
        )?;
        Ok(affected)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Hard delete. Returns `true` if a row was deleted.
    pub fn delete_order(&self, id: Uuid) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM service_orders WHERE id = ?1", params![id.to_string()])?;
        Ok(affected > 0)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn row_to_order(row: &rusqlite::Row<'_>) -> rusqlite::Result<ServiceOrder> {
    let status_str: String = row.get(10)?;
    let status: Status = status_str.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(10, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let images_json: String = row.get(12)?;
    let images: Vec<String> = serde_json::from_str(&images_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(12, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(ServiceOrder {
        id: uuid_at(row, 0)?,
        service_order_number: row.get(1)?,
        client_name: row.get(2)?,
        description: row.get(3)?,
        service_provider_id: uuid_at(row, 4)?,
        service_provider_name: row.get(5)?,
        departure_date: date_at(row, 6)?,
        expected_return_date: date_at(row, 7)?,
        actual_return_date: opt_date_at(row, 8)?,
        estimated_duration: row.get(9)?,
        status,
        notes: row.get(11)?,
        images,
        archived: row.get(13)?,
        created_at: timestamp_at(row, 14)?,
    })
}
