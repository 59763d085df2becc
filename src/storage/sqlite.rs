use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;

use super::traits::{DocumentStore, StorageError, DASHBOARD_DOC_TYPE};

const DB_SCHEMA_VERSION: i64 = 1;

/// Local document store backed by a single SQLite table.
#[derive(Clone)]
pub struct SqliteStore {
    pub path: String,
}

fn db_insert_document(
    conn: &Connection,
    doc_type: &str,
    payload: &str,
    ts: i64,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO documents (doc_type, payload, ts) VALUES (?1, ?2, ?3)",
        params![doc_type, payload, ts],
    )?;
    Ok(conn.last_insert_rowid())
}

fn db_latest_payload(conn: &Connection, doc_type: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT payload FROM documents WHERE doc_type = ?1 ORDER BY ts DESC, id DESC LIMIT 1",
        params![doc_type],
        |row| row.get(0),
    )
    .optional()
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn init(&self) -> Result<(), StorageError> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    pub fn insert_document(&self, doc_type: &str, payload: &Value) -> Result<i64, StorageError> {
        let serialized = serde_json::to_string(payload)?;
        let ts = chrono::Utc::now().timestamp_millis();
        Ok(self.with_conn(|conn| db_insert_document(conn, doc_type, &serialized, ts))?)
    }

    fn latest_payload(&self, doc_type: &str) -> Result<Option<Value>, StorageError> {
        let raw = self.with_conn(|conn| db_latest_payload(conn, doc_type))?;
        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        log::info!(
            "SQLite schema migration: {} -> {}",
            version,
            DB_SCHEMA_VERSION
        );

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                doc_type TEXT NOT NULL,
                payload TEXT NOT NULL,
                ts INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS documents_type_ts_idx
                ON documents(doc_type, ts);
        "#,
        )?;
        conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn latest_dashboard_payload(&self) -> Result<Option<Value>, StorageError> {
        self.latest_payload(DASHBOARD_DOC_TYPE)
    }
}
