//! PDF page text and metadata extraction using lopdf.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use lopdf::{Document, ObjectId};
use tracing::{debug, trace, warn};

use super::{MetadataExtractor, PageSource, PdfMetadata, Result};
use crate::error::PdfError;
use crate::identifier::{CufeMatcher, FieldExtractor};

/// A loaded PDF document.
pub struct PdfDocument {
    document: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfDocument {
    /// Load a PDF from bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;
        Self::from_document(document)
    }

    /// Load a PDF from a reader. The reader is consumed and dropped before returning.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document = Document::load_from(reader).map_err(|e| PdfError::Parse(e.to_string()))?;
        Self::from_document(document)
    }

    fn from_document(mut document: Document) -> Result<Self> {
        // Handle PDFs with empty password encryption
        if document.is_encrypted() {
            if document.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let pages = document.get_pages();
        debug!("Loaded PDF with {} pages", pages.len());
        Ok(Self { document, pages })
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        if !self.pages.contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }
        self.document
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction {
                page,
                reason: e.to_string(),
            })
    }
}

/// Scan pages in ascending order and return the first identifier with its page.
///
/// Pages after the matching one are never read. A page whose text cannot be
/// extracted is skipped.
pub fn find_identifier<P>(source: &P, matcher: &CufeMatcher) -> Option<(u32, String)>
where
    P: PageSource + ?Sized,
{
    for page in 1..=source.page_count() {
        let text = match source.page_text(page) {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping page {}: {}", page, e);
                continue;
            }
        };
        trace!("Page {}: {} chars of text", page, text.len());

        if let Some(found) = matcher.extract(&text) {
            if let Some((start, end)) = found.position {
                debug!(
                    "Identifier found on page {} at bytes {}..{} ({} lines)",
                    page,
                    start,
                    end,
                    found.source.lines().count()
                );
            }
            return Some((page, found.value));
        }
    }
    None
}

/// Extracts file name, size, page count and CUFE from PDF files on disk.
#[derive(Debug, Clone, Default)]
pub struct PdfMetadataExtractor {
    matcher: CufeMatcher,
}

impl PdfMetadataExtractor {
    pub fn new(matcher: CufeMatcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &CufeMatcher {
        &self.matcher
    }
}

impl MetadataExtractor for PdfMetadataExtractor {
    fn extract(&self, path: &Path) -> Result<PdfMetadata> {
        let io_error = |source: std::io::Error| PdfError::Io {
            path: path.display().to_string(),
            source,
        };

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                io_error(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path has no file name",
                ))
            })?;

        let file = File::open(path).map_err(io_error)?;
        let byte_size = file.metadata().map_err(io_error)?.len();
        let document = PdfDocument::from_reader(BufReader::new(file))?;

        let page_count = document.page_count();
        let found = find_identifier(&document, &self.matcher);
        let (identifier_page, identifier) = match found {
            Some((page, identifier)) => (Some(page), Some(identifier)),
            None => (None, None),
        };

        debug!(
            "{}: {} pages, {} bytes, identifier {}",
            file_name,
            page_count,
            byte_size,
            if identifier.is_some() { "found" } else { "not found" }
        );

        Ok(PdfMetadata {
            file_name,
            page_count,
            byte_size,
            identifier,
            identifier_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::{hex_cufe, text_pdf};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// Page source that records which pages were read.
    struct RecordingPages {
        pages: Vec<String>,
        read: RefCell<Vec<u32>>,
    }

    impl RecordingPages {
        fn new(pages: &[&str]) -> Self {
            Self {
                pages: pages.iter().map(|p| p.to_string()).collect(),
                read: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageSource for RecordingPages {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn page_text(&self, page: u32) -> Result<String> {
            self.read.borrow_mut().push(page);
            let text = &self.pages[(page - 1) as usize];
            if text == "<broken>" {
                return Err(PdfError::TextExtraction {
                    page,
                    reason: "bad font".to_string(),
                });
            }
            Ok(text.clone())
        }
    }

    #[test]
    fn test_find_identifier_stops_at_first_match() {
        let cufe = hex_cufe(96, 1);
        let later = hex_cufe(97, 2);
        let pages = RecordingPages::new(&["Factura", "nada", cufe.as_str(), later.as_str(), "fin"]);

        let found = find_identifier(&pages, &CufeMatcher::new());
        assert_eq!(found, Some((3, cufe)));
        assert_eq!(*pages.read.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_find_identifier_skips_unreadable_page() {
        let cufe = hex_cufe(96, 4);
        let pages = RecordingPages::new(&["<broken>", cufe.as_str()]);

        let found = find_identifier(&pages, &CufeMatcher::new());
        assert_eq!(found, Some((2, cufe)));
    }

    #[test]
    fn test_find_identifier_none() {
        let pages = RecordingPages::new(&["uno", "dos"]);
        assert_eq!(find_identifier(&pages, &CufeMatcher::new()), None);
        assert_eq!(*pages.read.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_document_page_text() {
        let data = text_pdf(&[&["Factura electronica de venta"], &["Pagina dos"]]);
        let document = PdfDocument::load(&data).unwrap();

        assert_eq!(document.page_count(), 2);
        assert!(document.page_text(2).unwrap().contains("Pagina dos"));
        assert!(matches!(document.page_text(3), Err(PdfError::InvalidPage(3))));
    }

    #[test]
    fn test_extract_identifier_on_second_page() {
        let cufe = hex_cufe(96, 7);
        let data = text_pdf(&[
            &["Factura electronica de venta", "Total 1.190.000"],
            &["CUFE:", &cufe[..48], &cufe[48..]],
        ]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inv1.pdf");
        std::fs::write(&path, &data).unwrap();

        let metadata = PdfMetadataExtractor::default().extract(&path).unwrap();
        assert_eq!(metadata.file_name, "inv1.pdf");
        assert_eq!(metadata.page_count, 2);
        assert_eq!(metadata.byte_size, data.len() as u64);
        assert_eq!(metadata.identifier, Some(cufe));
        assert_eq!(metadata.identifier_page, Some(2));
    }

    #[test]
    fn test_extract_zero_page_pdf() {
        let data = text_pdf(&[]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        std::fs::write(&path, &data).unwrap();

        let metadata = PdfMetadataExtractor::default().extract(&path).unwrap();
        assert_eq!(metadata.page_count, 0);
        assert_eq!(metadata.identifier, None);
        assert_eq!(metadata.identifier_page, None);
    }

    #[test]
    fn test_extract_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfMetadataExtractor::default().extract(&dir.path().join("missing.pdf"));
        assert!(matches!(result, Err(PdfError::Io { .. })));
    }

    #[test]
    fn test_extract_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let result = PdfMetadataExtractor::default().extract(&path);
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }
}
