//! SQLite-backed record store.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use super::{RecordStore, Result};
use crate::error::StoreError;
use crate::models::record::InvoiceRecord;

const CREATE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS invoices (
        file_name TEXT PRIMARY KEY,
        page_count INTEGER,
        identifier TEXT,
        byte_size INTEGER
    )
"#;

/// Record store in a single SQLite table.
///
/// The connection is opened once and held until [`SqliteStore::close`] or drop.
/// Each upsert runs in autocommit mode, so it is durable as soon as it returns.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.display().to_string(),
            source,
        })?;
        info!("Opened record store at {}", path.display());
        Ok(Self { conn })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: ":memory:".to_string(),
            source,
        })?;
        Ok(Self { conn })
    }

    /// Close the connection, reporting any error from SQLite.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))?;
        debug!("Closed record store");
        Ok(())
    }

    fn read_row(row: &Row<'_>) -> rusqlite::Result<(String, i64, Option<String>, i64)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }
}

impl RecordStore for SqliteStore {
    fn ensure_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(CREATE_SCHEMA)?;
        Ok(())
    }

    fn get(&self, file_name: &str) -> Result<Option<InvoiceRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT file_name, page_count, identifier, byte_size FROM invoices WHERE file_name = ?1",
                params![file_name],
                Self::read_row,
            )
            .optional()?;

        let Some((file_name, page_count, identifier, byte_size)) = row else {
            return Ok(None);
        };

        let page_count = u32::try_from(page_count).map_err(|_| StoreError::InvalidValue {
            column: "page_count",
            value: page_count,
        })?;
        let byte_size = u64::try_from(byte_size).map_err(|_| StoreError::InvalidValue {
            column: "byte_size",
            value: byte_size,
        })?;

        Ok(Some(InvoiceRecord {
            file_name,
            page_count,
            identifier,
            byte_size,
        }))
    }

    fn upsert(&mut self, record: &InvoiceRecord) -> Result<()> {
        let byte_size = i64::try_from(record.byte_size).map_err(|_| StoreError::TooLarge {
            column: "byte_size",
            value: record.byte_size,
        })?;

        self.conn.execute(
            r#"INSERT OR REPLACE INTO invoices (file_name, page_count, identifier, byte_size)
               VALUES (?1, ?2, ?3, ?4)"#,
            params![
                record.file_name,
                i64::from(record.page_count),
                record.identifier,
                byte_size
            ],
        )?;
        debug!("Upserted record for {}", record.file_name);
        Ok(())
    }

    fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM invoices", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}
