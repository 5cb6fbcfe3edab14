//! Size command - Size one configuration for all three platforms.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use tracing::info;

use sizer_core::SizingEngine;
use sizer_report::{render, write_report, ReportContext, ReportFormat};
use sizer_store::{FileStore, HistoryRepository};

use super::inputs::SizingArgs;
use crate::GlobalOptions;

#[derive(Args)]
pub struct SizeArgs {
    #[command(flatten)]
    pub sizing: SizingArgs,

    /// Output format (text, json, csv)
    #[arg(short, long, default_value = "text")]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Record the calculation in the history
    #[arg(long)]
    pub record: bool,
}

pub async fn execute(args: SizeArgs, global: &GlobalOptions) -> Result<()> {
    let config = args.sizing.build()?;
    let engine = SizingEngine::builtin();
    let result = engine.compute(&config)?;
    let ctx = ReportContext::new(engine.reference(), &config, &result)?;

    match &args.output {
        Some(path) => {
            write_report(&ctx, args.format, path)?;
            eprintln!("📄 {} report written to {}", args.format, path.display());
        }
        None => println!("{}", render(&ctx, args.format, Utc::now())?),
    }

    if args.record {
        let mut history = HistoryRepository::new(FileStore::new(&global.data_dir));
        let entry = history.append(&config, &result)?;
        info!("Recorded history entry {}", entry.id);
        eprintln!("🕑 Recorded in history ({})", global.data_dir.display());
    }

    Ok(())
}
