//! Stored invoice record.

use serde::{Deserialize, Serialize};

/// Metadata recorded for one invoice PDF, keyed by its file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Base name of the source document.
    pub file_name: String,

    /// Number of pages in the PDF.
    pub page_count: u32,

    /// CUFE identifier with embedded line breaks removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// File size in bytes at the time it was processed.
    pub byte_size: u64,
}

impl InvoiceRecord {
    pub fn new(
        file_name: impl Into<String>,
        page_count: u32,
        identifier: Option<String>,
        byte_size: u64,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            page_count,
            identifier,
            byte_size,
        }
    }

    /// Human-readable multi-line rendering used by the console.
    pub fn format_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("File name:  {}\n", self.file_name));
        output.push_str(&format!("Pages:      {}\n", self.page_count));
        output.push_str(&format!(
            "CUFE:       {}\n",
            self.identifier.as_deref().unwrap_or("-")
        ));
        output.push_str(&format!("Size:       {} bytes\n", self.byte_size));
        output
    }
}
