//! Catalog command - List SKUs, regions and workload profiles.

use anyhow::Result;
use clap::Args;
use serde_json::json;

use sizer_core::{Platform, ReferenceData};

#[derive(Args)]
pub struct CatalogArgs {
    /// Only list SKUs of this platform
    #[arg(short, long)]
    pub platform: Option<Platform>,

    /// List regions
    #[arg(long)]
    pub regions: bool,

    /// List workload profiles
    #[arg(long)]
    pub workloads: bool,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: CatalogArgs) -> Result<()> {
    let reference = ReferenceData::builtin();
    let everything = !args.regions && !args.workloads;
    let platforms: Vec<Platform> = match args.platform {
        Some(platform) => vec![platform],
        None => Platform::ALL.to_vec(),
    };

    if args.json {
        let skus: Vec<_> = platforms
            .iter()
            .flat_map(|p| reference.catalog().entries(*p))
            .collect();
        let mut document = json!({});
        if everything || args.platform.is_some() {
            document["skus"] = serde_json::to_value(&skus)?;
        }
        if everything || args.regions {
            document["regions"] = serde_json::to_value(reference.regions())?;
        }
        if everything || args.workloads {
            document["workloads"] = serde_json::to_value(reference.workloads())?;
        }
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    if everything || args.platform.is_some() {
        let base_region = reference.default_region();
        for platform in &platforms {
            println!("🏷️  {} ({} scaling)", platform.display_name(), platform.scaling_type());
            for entry in reference.catalog().entries(*platform) {
                println!(
                    "   {:<10} {:>6} {:<4} {:>4} cores {:>6} GB  {:>5} queries  {:>6} users  {:>12}/month",
                    entry.name,
                    entry.capacity,
                    entry.capacity_unit,
                    entry.specs.cores,
                    entry.specs.memory_gb,
                    entry.specs.concurrent_queries,
                    entry.specs.max_users,
                    base_region.format_amount(entry.base_price)
                );
            }
            println!();
        }
    }

    if everything || args.regions {
        println!("🌍 Regions");
        for region in reference.regions() {
            println!(
                "   {:<14} {:<26} {:<16} x{:<5} {}",
                region.id, region.name, region.code, region.pricing_multiplier, region.currency
            );
        }
        println!();
    }

    if everything || args.workloads {
        println!("⚙️  Workload profiles");
        for profile in reference.workloads() {
            println!(
                "   {:<10} {:<28} cpu {:.1}  memory {:.1}  io {:.1}",
                profile.id, profile.name, profile.cpu_intensity, profile.memory_intensity, profile.io_intensity
            );
        }
    }

    Ok(())
}
