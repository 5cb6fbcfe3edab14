//! Saved command - Manage named configurations.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

use sizer_core::{ReferenceData, SizingEngine};
use sizer_store::{FileStore, SavedConfigRepository, SavedConfigUpdate, SavedConfiguration};

use super::inputs::SizingArgs;
use crate::GlobalOptions;

#[derive(Args)]
pub struct SavedArgs {
    #[command(subcommand)]
    pub action: SavedAction,
}

#[derive(Subcommand)]
pub enum SavedAction {
    /// Size a configuration and save it under a name
    Save {
        /// Name of the saved configuration
        name: String,

        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,

        #[command(flatten)]
        sizing: SizingArgs,
    },

    /// List saved configurations
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one saved configuration
    Show {
        id: String,
    },

    /// Change the name, description or tags of a saved configuration
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Replace the tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Delete a saved configuration
    Delete {
        id: String,
    },

    /// Export a saved configuration as JSON
    Export {
        id: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a configuration previously exported as JSON
    Import {
        file: PathBuf,
    },
}

pub async fn execute(args: SavedArgs, global: &GlobalOptions) -> Result<()> {
    let mut saved = SavedConfigRepository::new(FileStore::new(&global.data_dir));

    match args.action {
        SavedAction::Save { name, description, sizing } => {
            let config = sizing.build()?;
            let result = SizingEngine::builtin().compute(&config)?;
            let entry = saved.save(name, description, &config, &result)?;
            info!("Saved configuration {}", entry.id);
            println!("✅ Saved '{}' ({})", entry.name, entry.id);
        }
        SavedAction::List { json } => {
            let entries = saved.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }
            if entries.is_empty() {
                println!("No saved configurations.");
                return Ok(());
            }
            let reference = ReferenceData::builtin();
            for entry in &entries {
                print_summary(entry, &reference);
            }
        }
        SavedAction::Show { id } => match saved.get(&id)? {
            Some(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
            None => bail!("Saved configuration not found: {}", id),
        },
        SavedAction::Update { id, name, description, tags } => {
            let mut update = SavedConfigUpdate::new();
            if let Some(name) = name {
                update = update.with_name(name);
            }
            if let Some(description) = description {
                update = update.with_description(description);
            }
            if !tags.is_empty() {
                update = update.with_tags(tags);
            }
            let entry = saved.update(&id, update)?;
            println!("✅ Updated '{}' ({})", entry.name, entry.id);
        }
        SavedAction::Delete { id } => {
            if saved.delete(&id)? {
                println!("🗑️  Deleted {}", id);
            } else {
                println!("⚠️  No saved configuration with id {}", id);
            }
        }
        SavedAction::Export { id, output } => {
            let json = saved.export_json(&id)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("📄 Exported {} to {}", id, path.display());
                }
                None => println!("{}", json),
            }
        }
        SavedAction::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let entry = saved.import_json(&json)?;
            println!("✅ Imported '{}' as {}", entry.name, entry.id);
        }
    }

    Ok(())
}

fn print_summary(entry: &SavedConfiguration, reference: &ReferenceData) {
    println!("{}", summary_line(entry, reference));
    if !entry.description.is_empty() {
        println!("   {}", entry.description);
    }
}

fn summary_line(entry: &SavedConfiguration, reference: &ReferenceData) -> String {
    let tags = if entry.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", entry.tags.join(", "))
    };
    format!(
        "💾 {}  {}  {} {}  {}/month{}",
        entry.id,
        entry.name,
        entry.updated_at.format("%Y-%m-%d"),
        entry.result.tier,
        reference.format_amount(&entry.config.region, entry.result.cost_breakdown.monthly_total),
        tags
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizer_core::SizingConfig;
    use sizer_store::MemoryStore;

    #[test]
    fn test_summary_uses_region_currency() {
        let reference = ReferenceData::builtin();
        let config = SizingConfig::new(2048.0, 50).with_region("eu-west");
        let result = SizingEngine::builtin().compute(&config).unwrap();
        let mut repo = SavedConfigRepository::new(MemoryStore::new());
        let entry = repo.save("Berlin", "", &config, &result).unwrap();

        let line = summary_line(&entry, &reference);
        let expected = reference.region("eu-west").unwrap().format_amount(result.cost_breakdown.monthly_total);
        assert!(line.contains(&format!("{}/month", expected)));
        assert!(line.contains('€'));
        assert!(!line.contains('$'));
    }
}
