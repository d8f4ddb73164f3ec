use rusqlite::Connection;

const UP_SQL: &str = r#"
-- Photo URIs, JSON array in upload order
ALTER TABLE service_orders ADD COLUMN images TEXT NOT NULL DEFAULT '[]';

-- Soft-hide flag, 0/1
ALTER TABLE service_orders ADD COLUMN archived INTEGER NOT NULL DEFAULT 0;

CREATE INDEX IF NOT EXISTS idx_service_orders_archived_created
    ON service_orders(archived, created_at DESC);
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
