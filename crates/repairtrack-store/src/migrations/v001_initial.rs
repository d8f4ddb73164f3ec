//! v001 -- Initial schema creation.
//!
//! Creates the two core tables: `service_providers` and `service_orders`.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Service providers
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS service_providers (
    id         TEXT PRIMARY KEY NOT NULL,   -- UUID v4
    name       TEXT NOT NULL,
    contact    TEXT,
    phone      TEXT,
    email      TEXT,
    address    TEXT,
    created_at TEXT NOT NULL                -- ISO-8601 / RFC-3339
);

-- ----------------------------------------------------------------
-- Service orders
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS service_orders (
    id                   TEXT PRIMARY KEY NOT NULL,  -- UUID v4
    service_order_number TEXT NOT NULL,
    client_name          TEXT NOT NULL,
    description          TEXT,
    service_provider_id  TEXT NOT NULL,              -- FK -> service_providers(id)
    departure_date       TEXT NOT NULL,              -- YYYY-MM-DD
    expected_return_date TEXT NOT NULL,              -- YYYY-MM-DD
    actual_return_date   TEXT,                       -- YYYY-MM-DD
    estimated_duration   INTEGER NOT NULL,           -- whole days
    status               TEXT NOT NULL,              -- ontime | warning | delayed
    notes                TEXT,
    created_at           TEXT NOT NULL,

    -- no cascade: a referenced provider must not be deleted
    FOREIGN KEY (service_provider_id) REFERENCES service_providers(id)
);

CREATE INDEX IF NOT EXISTS idx_service_orders_provider
    ON service_orders(service_provider_id);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
