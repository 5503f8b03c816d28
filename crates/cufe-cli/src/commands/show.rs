//! Show command - print the stored record for one file.

use std::path::PathBuf;

use clap::Args;

use cufe_core::{RecordStore, SqliteStore};

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// File name as recorded (base name, e.g. "inv1.pdf")
    #[arg(required = true)]
    file_name: String,

    /// SQLite database file (default: store.database_path from config)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary
    Text,
    /// JSON output
    Json,
}

pub fn run(args: ShowArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let database = args
        .database
        .unwrap_or_else(|| config.store.database_path.clone());

    if !database.exists() {
        anyhow::bail!("Database not found: {}", database.display());
    }

    let mut store = SqliteStore::open(&database)?;
    store.ensure_schema()?;
    let record = store.get(&args.file_name)?;
    store.close()?;

    let Some(record) = record else {
        anyhow::bail!("No record for {}", args.file_name);
    };

    match args.format {
        OutputFormat::Text => print!("{}", record.format_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
    }

    Ok(())
}
