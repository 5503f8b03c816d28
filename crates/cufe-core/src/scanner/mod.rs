//! Directory scanning: extract, look up, confirm, record.
//!
//! Files are handled strictly one after another. A file that cannot be read
//! is reported and the batch carries on; a store error ends the run.

mod confirm;

pub use confirm::{fixed_policy, is_affirmative, AlwaysOverwrite, ConfirmOverwrite, NeverOverwrite};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::record::InvoiceRecord;
use crate::pdf::{MetadataExtractor, PdfMetadataExtractor};
use crate::store::RecordStore;

/// What happened to one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// An identifier was found and the record was written.
    Recorded {
        record: InvoiceRecord,
        /// A previous record for the same file name was replaced.
        replaced: bool,
        /// Page the identifier was found on (1-indexed).
        page: Option<u32>,
    },
    /// A record already existed and overwriting was declined.
    Skipped { file_name: String },
    /// The file was read but holds no identifier. Nothing was written.
    NoIdentifier {
        file_name: String,
        page_count: u32,
        byte_size: u64,
    },
    /// The file could not be read as a PDF.
    Failed { file_name: String, error: String },
}

impl FileOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            FileOutcome::Recorded { record, .. } => &record.file_name,
            FileOutcome::Skipped { file_name }
            | FileOutcome::NoIdentifier { file_name, .. }
            | FileOutcome::Failed { file_name, .. } => file_name,
        }
    }
}

/// Result of a whole directory scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Number of candidate files found.
    pub candidates: usize,
    /// Per-file outcomes in processing order.
    pub outcomes: Vec<FileOutcome>,
}

impl ScanSummary {
    pub fn recorded(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Recorded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn not_found(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::NoIdentifier { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// Receives progress events while a scan runs.
pub trait ScanObserver {
    fn candidates_found(&mut self, _dir: &Path, _count: usize) {}

    /// Called before the confirmation prompt for an already recorded file.
    fn existing_record(&mut self, _existing: &InvoiceRecord) {}

    fn file_finished(&mut self, _outcome: &FileOutcome) {}

    fn scan_finished(&mut self, _summary: &ScanSummary) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Walks a directory of invoice PDFs and records their metadata.
pub struct Scanner<S, E = PdfMetadataExtractor> {
    store: S,
    extractor: E,
    extension: String,
}

impl<S, E> Scanner<S, E>
where
    S: RecordStore,
    E: MetadataExtractor,
{
    pub fn new(store: S, extractor: E) -> Self {
        Self {
            store,
            extractor,
            extension: "pdf".to_string(),
        }
    }

    /// Set the candidate file extension (with or without the leading dot).
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_lowercase();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back so the caller can close it.
    pub fn into_store(self) -> S {
        self.store
    }

    /// List candidate files in `dir`, sorted by file name.
    pub fn candidates(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let suffix = format!(".{}", self.extension);
        let mut files = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_lowercase();
            if !name.ends_with(&suffix) {
                continue;
            }
            if entry.file_type()?.is_dir() {
                debug!("Ignoring directory {}", entry.path().display());
                continue;
            }
            files.push(entry.path());
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Process every candidate in `dir`.
    ///
    /// Only store failures (and an unreadable directory) are returned as errors;
    /// everything else is reported per file in the summary.
    pub fn run(
        &mut self,
        dir: &Path,
        confirm: &mut dyn ConfirmOverwrite,
        observer: &mut dyn ScanObserver,
    ) -> Result<ScanSummary> {
        self.store.ensure_schema()?;

        let files = self.candidates(dir)?;
        info!("Found {} candidate files in {}", files.len(), dir.display());
        observer.candidates_found(dir, files.len());

        let mut summary = ScanSummary {
            candidates: files.len(),
            outcomes: Vec::with_capacity(files.len()),
        };

        for path in &files {
            let outcome = self.process_file(path, confirm, observer)?;
            observer.file_finished(&outcome);
            summary.outcomes.push(outcome);
        }

        info!(
            "Scan complete: {} recorded, {} skipped, {} without identifier, {} failed",
            summary.recorded(),
            summary.skipped(),
            summary.not_found(),
            summary.failed()
        );
        observer.scan_finished(&summary);
        Ok(summary)
    }

    fn process_file(
        &mut self,
        path: &Path,
        confirm: &mut dyn ConfirmOverwrite,
        observer: &mut dyn ScanObserver,
    ) -> Result<FileOutcome> {
        let metadata = match self.extractor.extract(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                return Ok(FileOutcome::Failed {
                    file_name,
                    error: e.to_string(),
                });
            }
        };

        let existing = self.store.get(&metadata.file_name)?;
        if let Some(existing) = &existing {
            observer.existing_record(existing);
            if !confirm.confirm_overwrite(&metadata.file_name) {
                debug!("Keeping existing record for {}", metadata.file_name);
                return Ok(FileOutcome::Skipped {
                    file_name: metadata.file_name,
                });
            }
        }

        let page = metadata.identifier_page;
        let (file_name, page_count, byte_size) =
            (metadata.file_name.clone(), metadata.page_count, metadata.byte_size);

        let Some(record) = metadata.into_record() else {
            debug!("No identifier in {}", file_name);
            return Ok(FileOutcome::NoIdentifier {
                file_name,
                page_count,
                byte_size,
            });
        };

        self.store.upsert(&record)?;
        Ok(FileOutcome::Recorded {
            record,
            replaced: existing.is_some(),
            page,
        })
    }
}
