// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Persistent document store backed by SQLite.
//
// Each row holds a complete record: metadata, the PDF payload, the optional
// PNG thumbnail, and a SHA-256 digest of the payload that is checked on every
// read.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, params};
use tracing::{debug, info, instrument, warn};

use photopdf_core::error::{PhotoPdfError, Result};
use photopdf_core::types::{DocumentId, StoredDocumentRecord};

use crate::integrity::{content_digest, verify_digest};
use crate::notify::{ChangeNotifier, StoreChange};
use crate::store::{DocumentListing, DocumentStore};

/// SQLite schema for the documents table.
const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        file_extension TEXT NOT NULL DEFAULT 'pdf',
        created_at TEXT NOT NULL,
        pdf_data BLOB NOT NULL,
        thumbnail BLOB,
        file_size TEXT NOT NULL,
        content_hash TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS documents_by_created_at ON documents (created_at DESC);
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, name, file_extension, created_at, pdf_data, thumbnail, file_size, content_hash FROM documents";

/// Document store persisted in a SQLite database file.
///
/// All methods are synchronous; `rusqlite` has no async API and every call
/// here is a single short statement.
pub struct SqliteDocumentStore {
    conn: Connection,
    notifier: ChangeNotifier,
}

impl std::fmt::Debug for SqliteDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDocumentStore")
            .field("path", &self.conn.path())
            .field("notifier", &self.notifier)
            .finish()
    }
}

impl SqliteDocumentStore {
    /// Open (or create) the document database at the given path.
    ///
    /// Applies WAL journal mode and creates the `documents` table if it does
    /// not exist.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| PhotoPdfError::Store(format!("open: {e}")))?;

        // WAL keeps the database intact across unclean shutdowns.
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| PhotoPdfError::Store(format!("WAL pragma: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| PhotoPdfError::Store(format!("create table: {e}")))?;

        info!("document database opened");
        Ok(Self {
            conn,
            notifier: ChangeNotifier::new(),
        })
    }

    /// Open an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PhotoPdfError::Store(format!("open in-memory: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| PhotoPdfError::Store(format!("create table: {e}")))?;

        debug!("in-memory document database opened");
        Ok(Self {
            conn,
            notifier: ChangeNotifier::new(),
        })
    }

    /// Rows with their stored digests, unverified.
    fn query_rows(&self, sql: &str, id: Option<&str>) -> Result<Vec<(StoredDocumentRecord, String)>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| PhotoPdfError::Store(format!("prepare: {e}")))?;

        let rows = match id {
            Some(id) => stmt.query_map(params![id], row_to_record),
            None => stmt.query_map([], row_to_record),
        }
        .map_err(|e| PhotoPdfError::Store(format!("query: {e}")))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| PhotoPdfError::Store(format!("collect rows: {e}")))?;
        Ok(rows)
    }
}

impl DocumentStore for SqliteDocumentStore {
    #[instrument(skip(self, record), fields(id = %record.id, bytes = record.pdf_data.len()))]
    fn save(&self, record: &StoredDocumentRecord) -> Result<()> {
        let inserted = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO documents (id, name, file_extension, created_at,
                 pdf_data, thumbnail, file_size, content_hash)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id.to_string(),
                    record.name,
                    record.file_extension,
                    format_timestamp(&record.created_at),
                    record.pdf_data,
                    record.thumbnail,
                    record.file_size,
                    content_digest(&record.pdf_data),
                ],
            )
            .map_err(|e| PhotoPdfError::Store(format!("insert document: {e}")))?;

        if inserted == 0 {
            return Err(PhotoPdfError::Store(format!("document {} already exists", record.id)));
        }

        info!("document saved");
        self.notifier.notify(StoreChange::Saved(record.id));
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    fn get(&self, id: &DocumentId) -> Result<Option<StoredDocumentRecord>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let id = id.to_string();
        let Some((record, content_hash)) = self.query_rows(&sql, Some(&id))?.into_iter().next() else {
            return Ok(None);
        };
        verify_digest(&record.pdf_data, &content_hash).inspect_err(|_| {
            warn!(id = %record.id, "stored payload does not match its digest");
        })?;
        Ok(Some(record))
    }

    #[instrument(skip(self), fields(id = %id))]
    fn delete(&self, id: &DocumentId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM documents WHERE id = ?1", params![id.to_string()])
            .map_err(|e| PhotoPdfError::Store(format!("delete document: {e}")))?;

        if deleted == 0 {
            return Err(PhotoPdfError::NotFound(*id));
        }

        info!("document deleted");
        self.notifier.notify(StoreChange::Deleted(*id));
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete_all(&self) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM documents", [])
            .map_err(|e| PhotoPdfError::Store(format!("delete all documents: {e}")))?;

        info!(deleted, "all documents deleted");
        self.notifier.notify(StoreChange::Cleared);
        Ok(())
    }

    #[instrument(skip(self))]
    fn list_all(&self) -> Result<Vec<StoredDocumentRecord>> {
        self.list_checked().map(|listing| listing.records)
    }

    fn list_checked(&self) -> Result<DocumentListing> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC");
        let mut listing = DocumentListing::default();
        for (record, content_hash) in self.query_rows(&sql, None)? {
            if verify_digest(&record.pdf_data, &content_hash).is_ok() {
                listing.records.push(record);
            } else {
                warn!(id = %record.id, "skipping document whose payload does not match its digest");
                listing.damaged.push(record.id);
            }
        }
        debug!(
            count = listing.records.len(),
            damaged = listing.damaged.len(),
            "retrieved all documents"
        );
        Ok(listing)
    }

    fn count(&self) -> Result<usize> {
        self.conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .map_err(|e| PhotoPdfError::Store(format!("count documents: {e}")))
    }

    fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}

/// Timestamps are stored with a fixed nine-digit fraction so that text order
/// is time order.
fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// Map a SQLite row to a record and its stored payload digest.
///
/// Column indices must match `SELECT_COLUMNS`.
fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<(StoredDocumentRecord, String)> {
    let id_str: String = row.get(0)?;
    let name: String = row.get(1)?;
    let file_extension: String = row.get(2)?;
    let created_at_str: String = row.get(3)?;
    let pdf_data: Vec<u8> = row.get(4)?;
    let thumbnail: Option<Vec<u8>> = row.get(5)?;
    let file_size: String = row.get(6)?;
    let content_hash: String = row.get(7)?;

    let uuid = uuid::Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok((
        StoredDocumentRecord {
            id: DocumentId(uuid),
            name,
            file_extension,
            created_at,
            pdf_data,
            thumbnail,
            file_size,
        },
        content_hash,
    ))
}
