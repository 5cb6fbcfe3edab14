//! History command - List, summarize or clear recorded calculations.

use anyhow::Result;
use clap::{Args, Subcommand};

use sizer_core::ReferenceData;
use sizer_store::{FileStore, HistoryEntry, HistoryRepository};

use crate::GlobalOptions;

#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub action: HistoryAction,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recorded calculations, newest first
    List {
        /// Show at most this many entries
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show monthly cost statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove every recorded calculation
    Clear,
}

pub async fn execute(args: HistoryArgs, global: &GlobalOptions) -> Result<()> {
    let mut history = HistoryRepository::new(FileStore::new(&global.data_dir));

    match args.action {
        HistoryAction::List { limit, json } => {
            let entries: Vec<_> = history.list()?.into_iter().take(limit).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }
            if entries.is_empty() {
                println!("No calculations recorded yet.");
                return Ok(());
            }
            let reference = ReferenceData::builtin();
            for entry in &entries {
                println!("{}", entry_line(entry, &reference));
            }
        }
        HistoryAction::Stats { json } => {
            let stats = history.stats()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            match stats {
                Some(stats) => {
                    // Mixed regions have no single currency; use the newest entry's.
                    let reference = ReferenceData::builtin();
                    let region = history
                        .list()?
                        .first()
                        .map(|e| e.config.region.clone())
                        .unwrap_or_else(|| reference.default_region().id.clone());
                    println!("📈 History statistics");
                    println!("   Entries:         {}", stats.total_entries);
                    println!("   Average monthly: {}", reference.format_amount(&region, stats.average_monthly_cost));
                    println!("   Lowest monthly:  {}", reference.format_amount(&region, stats.min_monthly_cost));
                    println!("   Highest monthly: {}", reference.format_amount(&region, stats.max_monthly_cost));
                }
                None => println!("No calculations recorded yet."),
            }
        }
        HistoryAction::Clear => {
            history.clear()?;
            println!("✅ History cleared");
        }
    }

    Ok(())
}

fn entry_line(entry: &HistoryEntry, reference: &ReferenceData) -> String {
    let config = &entry.config;
    format!(
        "🕑 {}  {:>10.0} GB  {:>6} users  {:<12} {:>16}/month  {}",
        entry.timestamp.format("%Y-%m-%d %H:%M"),
        config.data_volume_gb,
        config.concurrent_users,
        entry.result.tier.to_string(),
        reference.format_amount(&config.region, entry.result.cost_breakdown.monthly_total),
        entry.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizer_core::{compute_sizing, SizingConfig};
    use sizer_store::MemoryStore;

    #[test]
    fn test_entry_line_uses_region_currency() {
        let reference = ReferenceData::builtin();
        let config = SizingConfig::new(512.0, 10).with_region("ap-northeast");
        let result = compute_sizing(&config).unwrap();
        let mut history = HistoryRepository::new(MemoryStore::new());
        let entry = history.append(&config, &result).unwrap();

        let line = entry_line(&entry, &reference);
        assert!(line.contains('¥'));
        assert!(!line.contains('$'));
        assert!(line.ends_with(&entry.id));
    }
}
