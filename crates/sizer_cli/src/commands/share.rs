//! Share command - Create or read a shareable link.

use anyhow::Result;
use clap::Args;

use sizer_core::SizingEngine;
use sizer_report::{parse_share_link, share_link, DEFAULT_SHARE_BASE_URL};

use super::inputs::SizingArgs;

#[derive(Args)]
pub struct ShareArgs {
    #[command(flatten)]
    pub sizing: SizingArgs,

    /// Base URL the query string is appended to
    #[arg(long, default_value = DEFAULT_SHARE_BASE_URL)]
    pub base_url: String,

    /// Read a link instead of creating one
    #[arg(long, value_name = "LINK")]
    pub decode: Option<String>,
}

pub async fn execute(args: ShareArgs) -> Result<()> {
    if let Some(link) = &args.decode {
        let config = parse_share_link(link)?;
        let engine = SizingEngine::builtin();
        let result = engine.compute(&config)?;
        let monthly = engine
            .reference()
            .format_amount(&config.region, result.cost_breakdown.monthly_total);
        println!("🔗 Configuration");
        println!("{}", serde_json::to_string_pretty(&config)?);
        println!();
        println!(
            "   {} tier: Fabric {}, Synapse {}, Databricks {} ({}/month)",
            result.tier, result.fabric.sku, result.synapse.sku, result.databricks.sku, monthly
        );
        return Ok(());
    }

    let config = args.sizing.build()?;
    config.validate()?;
    println!("{}", share_link(&args.base_url, &config));
    Ok(())
}
