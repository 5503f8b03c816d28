//! Core library for invoice PDF scanning.
//!
//! This crate provides:
//! - CUFE identifier matching over extracted text
//! - PDF metadata extraction (page count, size, identifier)
//! - A SQLite record store keyed by file name
//! - The directory scanner that ties them together

pub mod error;
pub mod identifier;
pub mod models;
pub mod pdf;
pub mod scanner;
pub mod store;

pub use error::{CufeError, PdfError, Result, StoreError};
pub use identifier::{extract_cufe, CufeMatcher};
pub use models::{CufeConfig, InvoiceRecord, OverwritePolicy};
pub use pdf::{MetadataExtractor, PdfDocument, PdfMetadata, PdfMetadataExtractor};
pub use scanner::{ConfirmOverwrite, FileOutcome, ScanObserver, ScanSummary, Scanner};
pub use store::{RecordStore, SqliteStore};
