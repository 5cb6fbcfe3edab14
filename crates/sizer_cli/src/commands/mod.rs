//! CLI command definitions.
//!
//! Each subcommand wraps one operation of the sizing engine or one of its
//! collaborators (history, saved configurations, reports).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod catalog;
pub mod compare;
pub mod history;
pub mod inputs;
pub mod saved;
pub mod share;
pub mod size;
pub mod specs;

/// DWH Sizer - data warehouse sizing and cost estimation
#[derive(Parser)]
#[command(name = "dwh-sizer")]
#[command(version, about = "DWH Sizer - data warehouse sizing and cost estimation")]
#[command(long_about = r#"
DWH Sizer recommends a SKU for Microsoft Fabric, Azure Synapse and Azure
Databricks from a data volume, a concurrency level and a handful of workload
parameters, and estimates monthly cost and performance.

COMMANDS:
  size     → Size one configuration (flags, preset or config file)
  compare  → Size the built-in comparison scenarios
  catalog  → List SKUs, regions and workload profiles
  specs    → Show the technical specification table
  history  → List, summarize or clear recorded calculations
  saved    → Manage saved configurations
  share    → Create or read a shareable link

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration error
  4 - Storage error
  5 - Report error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Directory for history and saved configurations
    #[arg(long, global = true, env = "DWH_SIZER_HISTORY_DIR", default_value = ".dwh-sizer")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Size a configuration for all three platforms
    Size(size::SizeArgs),

    /// Size the built-in comparison scenarios
    Compare(compare::CompareArgs),

    /// List catalog SKUs, regions and workload profiles
    Catalog(catalog::CatalogArgs),

    /// Show the technical specification table
    Specs(specs::SpecsArgs),

    /// Inspect or clear the calculation history
    History(history::HistoryArgs),

    /// Manage saved configurations
    Saved(saved::SavedArgs),

    /// Create or read a shareable link
    Share(share::ShareArgs),
}
