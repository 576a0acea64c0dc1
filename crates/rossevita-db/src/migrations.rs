use rusqlite::Connection;

use crate::DbError;

pub fn run(conn: &Connection) -> Result<(), DbError> {
    // Idempotent CREATE TABLE IF NOT EXISTS
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS attachments (
            path        TEXT PRIMARY KEY,
            bucket      TEXT NOT NULL,
            file_name   TEXT NOT NULL,
            mime_type   TEXT NOT NULL DEFAULT '',
            size        INTEGER NOT NULL DEFAULT 0,
            public_url  TEXT,
            user_id     TEXT,
            task_id     TEXT,
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_attachments_created
            ON attachments(created_at DESC);
        ",
    )?;
    Ok(())
}
