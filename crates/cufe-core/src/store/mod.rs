//! Persistent invoice record storage.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::StoreError;
use crate::models::record::InvoiceRecord;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// A table of invoice records keyed by file name.
///
/// Records are only created or replaced in full; there is no delete.
pub trait RecordStore {
    /// Create the backing table if it does not exist. Safe to call on every startup.
    fn ensure_schema(&mut self) -> Result<()>;

    /// Exact-key lookup.
    fn get(&self, file_name: &str) -> Result<Option<InvoiceRecord>>;

    /// Insert the record, or replace every field of the existing one.
    fn upsert(&mut self, record: &InvoiceRecord) -> Result<()>;

    /// Number of stored records.
    fn count(&self) -> Result<u64>;
}
