use rusqlite::{params, Row};

use rossevita_core::attachment::AttachmentRow;

use crate::{Db, DbError};

/// Upper bound on rows returned by `list_recent_attachments`.
pub const RECENT_ROW_LIMIT: i64 = 500;

fn row_to_attachment(row: &Row) -> rusqlite::Result<AttachmentRow> {
    Ok(AttachmentRow {
        path: row.get("path")?,
        bucket: row.get("bucket")?,
        file_name: row.get("file_name")?,
        mime_type: row.get("mime_type")?,
        size: row.get("size")?,
        public_url: row.get("public_url")?,
        user_id: row.get("user_id")?,
        task_id: row.get("task_id")?,
        created_at: row.get("created_at")?,
    })
}

impl Db {
    /// Insert or replace the metadata row for `row.path`. `path` is the
    /// natural key; a re-upload to the same key overwrites the old row.
    pub fn upsert_attachment(&self, row: &AttachmentRow) -> Result<AttachmentRow, DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO attachments
                     (path, bucket, file_name, mime_type, size, public_url, user_id, task_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(path) DO UPDATE SET
                     bucket     = excluded.bucket,
                     file_name  = excluded.file_name,
                     mime_type  = excluded.mime_type,
                     size       = excluded.size,
                     public_url = excluded.public_url,
                     user_id    = excluded.user_id,
                     task_id    = excluded.task_id,
                     created_at = excluded.created_at",
                params![
                    row.path,
                    row.bucket,
                    row.file_name,
                    row.mime_type,
                    row.size,
                    row.public_url,
                    row.user_id,
                    row.task_id,
                    row.created_at,
                ],
            )?;
            conn.query_row(
                "SELECT * FROM attachments WHERE path = ?1",
                params![row.path],
                row_to_attachment,
            )
            .map_err(DbError::from)
        })
    }

    /// The most recently created rows, newest first, capped at
    /// `RECENT_ROW_LIMIT`.
    pub fn list_recent_attachments(&self) -> Result<Vec<AttachmentRow>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM attachments ORDER BY created_at DESC LIMIT ?1",
            )?;
            let rows = stmt
                .query_map(params![RECENT_ROW_LIMIT], row_to_attachment)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_attachment(&self, path: &str) -> Result<AttachmentRow, DbError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM attachments WHERE path = ?1",
                params![path],
                row_to_attachment,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DbError::NotFound(format!("attachment {path}"))
                }
                other => DbError::Sqlite(other),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_row(path: &str, secs: i64) -> AttachmentRow {
        AttachmentRow {
            path: path.to_string(),
            bucket: "uploads".into(),
            file_name: "a.png".into(),
            mime_type: "image/png".into(),
            size: 100,
            public_url: Some(format!("https://host/uploads/{path}")),
            user_id: None,
            task_id: None,
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn upsert_inserts_then_replaces_by_path() {
        let db = Db::open_in_memory().unwrap();
        db.upsert_attachment(&sample_row("1_a.png", 100)).unwrap();

        let mut updated = sample_row("1_a.png", 200);
        updated.size = 250;
        db.upsert_attachment(&updated).unwrap();

        let rows = db.list_recent_attachments().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].size, 250);
        assert_eq!(rows[0].created_at, Utc.timestamp_opt(200, 0).unwrap());
    }

    #[test]
    fn list_recent_orders_newest_first() {
        let db = Db::open_in_memory().unwrap();
        db.upsert_attachment(&sample_row("1_old.png", 100)).unwrap();
        db.upsert_attachment(&sample_row("3_new.png", 300)).unwrap();
        db.upsert_attachment(&sample_row("2_mid.png", 200)).unwrap();

        let rows = db.list_recent_attachments().unwrap();
        let paths: Vec<&str> = rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["3_new.png", "2_mid.png", "1_old.png"]);
    }

    #[test]
    fn get_missing_path_is_not_found() {
        let db = Db::open_in_memory().unwrap();
        let err = db.get_attachment("nope.png").unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[test]
    fn nullable_columns_round_trip() {
        let db = Db::open_in_memory().unwrap();
        let mut row = sample_row("1_a.png", 100);
        row.public_url = None;
        row.user_id = Some("user-1".into());
        row.task_id = Some("task-9".into());
        let stored = db.upsert_attachment(&row).unwrap();
        assert_eq!(stored.public_url, None);
        assert_eq!(stored.user_id.as_deref(), Some("user-1"));
        assert_eq!(stored.task_id.as_deref(), Some("task-9"));
    }

    #[test]
    fn open_creates_file_backed_db() {
        let tmp = tempfile::tempdir().unwrap();
        let db = Db::open(&tmp.path().join("test.db")).unwrap();
        db.upsert_attachment(&sample_row("1_a.png", 1)).unwrap();
        assert_eq!(db.list_recent_attachments().unwrap().len(), 1);
    }
}
