//! Specs command - Show the technical specification table.

use anyhow::Result;
use clap::Args;
use serde_json::{json, Value};

use sizer_core::{Platform, TECHNICAL_SPECIFICATIONS};

#[derive(Args)]
pub struct SpecsArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: SpecsArgs) -> Result<()> {
    if args.json {
        let rows: Vec<Value> = TECHNICAL_SPECIFICATIONS
            .iter()
            .map(|row| {
                json!({
                    "feature": row.feature,
                    "fabric": row.fabric,
                    "synapse": row.synapse,
                    "databricks": row.databricks,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("📋 Technical specifications");
    println!();
    for row in TECHNICAL_SPECIFICATIONS {
        println!("{}", row.feature);
        for platform in Platform::ALL {
            println!("   {:<26} {}", platform.display_name(), row.value(platform));
        }
    }

    Ok(())
}
