//! PDF processing module.

mod extractor;
#[cfg(test)]
pub(crate) mod fixtures;

pub use extractor::{find_identifier, PdfDocument, PdfMetadataExtractor};

use std::path::Path;

use crate::error::PdfError;
use crate::models::record::InvoiceRecord;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Anything that can hand out text page by page.
pub trait PageSource {
    /// Get the number of pages.
    fn page_count(&self) -> u32;

    /// Extract text from a specific page (1-indexed).
    fn page_text(&self, page: u32) -> Result<String>;
}

/// Trait for per-file metadata extraction.
pub trait MetadataExtractor {
    /// Read `path` and collect its invoice metadata.
    fn extract(&self, path: &Path) -> Result<PdfMetadata>;
}

/// Metadata collected from one PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfMetadata {
    /// Base file name.
    pub file_name: String,
    /// Number of pages.
    pub page_count: u32,
    /// File size in bytes when it was read.
    pub byte_size: u64,
    /// First identifier found, line breaks removed.
    pub identifier: Option<String>,
    /// Page (1-indexed) the identifier was found on.
    pub identifier_page: Option<u32>,
}

impl PdfMetadata {
    /// Convert into a storable record. Files without an identifier are never stored.
    pub fn into_record(self) -> Option<InvoiceRecord> {
        let identifier = self.identifier?;
        Some(InvoiceRecord::new(
            self.file_name,
            self.page_count,
            Some(identifier),
            self.byte_size,
        ))
    }
}
