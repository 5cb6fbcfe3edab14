//! Compare command - Size the built-in comparison scenarios.

use anyhow::Result;
use clap::Args;

use sizer_core::{builtin_scenarios, SizingEngine};

use super::inputs::SizingArgs;

#[derive(Args)]
pub struct CompareArgs {
    /// Parameters shared by every scenario; volume and users come from the scenario
    #[command(flatten)]
    pub sizing: SizingArgs,

    /// Print the outcomes as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: CompareArgs) -> Result<()> {
    let base = args.sizing.build()?;
    let engine = SizingEngine::builtin();
    let outcomes = engine.compare(&builtin_scenarios(), &base)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    let region = engine.reference().region(&base.region)?;
    println!("📊 Comparing {} scenarios in {}", outcomes.len(), region.name);
    println!();
    println!(
        "{:<32} {:<12} {:<8} {:<10} {:<10} {:>14}",
        "Scenario", "Tier", "Fabric", "Synapse", "Databricks", "Monthly"
    );
    for outcome in &outcomes {
        let result = &outcome.result;
        println!(
            "{:<32} {:<12} {:<8} {:<10} {:<10} {:>14}",
            outcome.scenario.name,
            result.tier.to_string(),
            result.fabric.sku,
            result.synapse.sku,
            result.databricks.sku,
            region.format_amount(result.cost_breakdown.monthly_total)
        );
    }

    let saturated: Vec<_> = outcomes.iter().filter(|o| o.result.is_saturated()).collect();
    if !saturated.is_empty() {
        println!();
        for outcome in saturated {
            println!("   ⚠️  {} exceeds the largest SKU on at least one platform", outcome.scenario.name);
        }
    }

    Ok(())
}
