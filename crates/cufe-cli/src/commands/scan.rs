//! Scan command - record every invoice PDF in a directory.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::{debug, info};

use cufe_core::models::config::OverwritePolicy;
use cufe_core::scanner::{fixed_policy, ConfirmOverwrite, Scanner};
use cufe_core::{CufeMatcher, PdfMetadataExtractor, SqliteStore};

use crate::prompt::LinePrompt;
use crate::report::ConsoleReporter;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Directory containing the invoice PDFs (default: scan.source_dir from config)
    dir: Option<PathBuf>,

    /// SQLite database file (default: store.database_path from config)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// What to do when a file is already recorded
    #[arg(long, value_enum)]
    overwrite: Option<OverwriteMode>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OverwriteMode {
    /// Ask for each file
    Ask,
    /// Replace existing records
    Always,
    /// Keep existing records
    Never,
}

impl From<OverwriteMode> for OverwritePolicy {
    fn from(mode: OverwriteMode) -> Self {
        match mode {
            OverwriteMode::Ask => OverwritePolicy::Ask,
            OverwriteMode::Always => OverwritePolicy::Always,
            OverwriteMode::Never => OverwritePolicy::Never,
        }
    }
}

pub fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let dir = args.dir.unwrap_or_else(|| config.scan.source_dir.clone());
    if !dir.is_dir() {
        anyhow::bail!("Source directory not found: {}", dir.display());
    }
    let database = args
        .database
        .unwrap_or_else(|| config.store.database_path.clone());
    let policy = args
        .overwrite
        .map(OverwritePolicy::from)
        .unwrap_or(config.prompt.overwrite);

    info!("Scanning {} into {}", dir.display(), database.display());
    debug!("Overwrite policy: {:?}", policy);

    let matcher = CufeMatcher::from_config(&config.identifier)?;
    let store = SqliteStore::open(&database)?;
    let mut scanner = Scanner::new(store, PdfMetadataExtractor::new(matcher))
        .with_extension(&config.scan.extension);

    let mut confirm: Box<dyn ConfirmOverwrite> = match fixed_policy(policy) {
        Some(fixed) => fixed,
        None => Box::new(LinePrompt::stdin()),
    };
    let mut reporter = ConsoleReporter::new();

    let summary = scanner.run(&dir, confirm.as_mut(), &mut reporter)?;
    scanner.into_store().close()?;

    debug!(
        "Processed {} files in {:?}",
        summary.outcomes.len(),
        start.elapsed()
    );
    Ok(())
}
