//! Error types for the cufe-core library.

use thiserror::Error;

/// Main error type for the cufe library.
#[derive(Error, Debug)]
pub enum CufeError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from a page.
    #[error("failed to extract text from page {page}: {reason}")]
    TextExtraction { page: u32, reason: String },

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to the record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database file could not be opened or created.
    #[error("failed to open database at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// A stored value is out of range for its column type.
    #[error("invalid value in column {column}: {value}")]
    InvalidValue { column: &'static str, value: i64 },

    /// A value is too large to be stored in its column.
    #[error("value for column {column} is too large to store: {value}")]
    TooLarge { column: &'static str, value: u64 },
}

/// Result type for the cufe library.
pub type Result<T> = std::result::Result<T, CufeError>;
