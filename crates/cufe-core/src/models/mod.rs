//! Data models.

pub mod config;
pub mod record;

pub use config::{CufeConfig, IdentifierConfig, OverwritePolicy};
pub use record::InvoiceRecord;
