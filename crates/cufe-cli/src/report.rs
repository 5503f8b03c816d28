//! Console output for scan progress.

use std::path::Path;

use console::style;

use cufe_core::scanner::{FileOutcome, ScanObserver, ScanSummary};
use cufe_core::InvoiceRecord;

/// Prints one block per file as the scan goes.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ScanObserver for ConsoleReporter {
    fn candidates_found(&mut self, dir: &Path, count: usize) {
        println!(
            "{} Found {} PDF files in {}",
            style("ℹ").blue(),
            count,
            dir.display()
        );
        println!();
    }

    fn existing_record(&mut self, existing: &InvoiceRecord) {
        println!(
            "{} {} is already recorded ({} pages, {} bytes)",
            style("!").yellow(),
            existing.file_name,
            existing.page_count,
            existing.byte_size
        );
    }

    fn file_finished(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Recorded {
                record,
                replaced,
                page,
            } => {
                print!("{}", record.format_text());
                if let Some(page) = page {
                    println!("Found on:   page {}", page);
                }
                let action = if *replaced { "updated" } else { "inserted" };
                println!("{} Record {} for {}", style("✓").green(), action, record.file_name);
            }
            FileOutcome::Skipped { file_name } => {
                println!("{} Skipped {}, existing record kept", style("-").dim(), file_name);
            }
            FileOutcome::NoIdentifier { file_name, .. } => {
                println!("{} No CUFE found in {}", style("✗").yellow(), file_name);
            }
            FileOutcome::Failed { file_name, error } => {
                println!("{} Failed to process {}: {}", style("✗").red(), file_name, error);
            }
        }
        println!();
    }

    fn scan_finished(&mut self, summary: &ScanSummary) {
        println!(
            "{} Done: {} files, {} recorded, {} skipped, {} without CUFE, {} failed",
            style("✓").green(),
            summary.candidates,
            style(summary.recorded()).green(),
            summary.skipped(),
            style(summary.not_found()).yellow(),
            style(summary.failed()).red()
        );
    }
}
