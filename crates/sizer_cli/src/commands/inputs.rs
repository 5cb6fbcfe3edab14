//! Sizing parameters shared by several commands.

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use clap::Args;
use regex::Regex;
use tracing::debug;

use sizer_core::{
    ConfigPreset, IngestionType, PricingModel, QueryComplexity, SizingConfig, SlaRequirement, Tier,
};

/// Parse a data volume in GB. Accepts plain numbers and `MB`, `GB`, `TB`
/// or `PB` suffixes, e.g. `2TB` or `512 GB`.
pub fn parse_data_volume(input: &str) -> Result<f64, String> {
    let captures = data_volume_pattern()?
        .captures(input)
        .ok_or_else(|| format!("'{}' is not a data volume (try 500, 512GB or 2TB)", input))?;

    let amount: f64 = captures[1]
        .parse()
        .map_err(|_| format!("'{}' is not a number", &captures[1]))?;
    let unit = captures.get(2).map(|m| m.as_str().to_lowercase());
    let gb = match unit.as_deref() {
        Some("mb") => amount / 1024.0,
        Some("tb") => amount * 1024.0,
        Some("pb") => amount * 1024.0 * 1024.0,
        _ => amount,
    };
    Ok(gb)
}

fn data_volume_pattern() -> Result<&'static Regex, String> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)^\s*([0-9]+(?:\.[0-9]+)?)\s*(mb|gb|tb|pb)?\s*$"))
        .as_ref()
        .map_err(|e| e.to_string())
}

#[derive(Args, Debug, Clone, Default)]
pub struct SizingArgs {
    /// Load the configuration from a YAML, JSON or TOML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Reset advanced parameters to a preset (simple, advanced)
    #[arg(long)]
    pub preset: Option<ConfigPreset>,

    /// Data volume, e.g. 1024, 512GB or 2TB
    #[arg(short, long = "data-volume", value_parser = parse_data_volume)]
    pub data_volume: Option<f64>,

    /// Concurrent users
    #[arg(short, long)]
    pub users: Option<u32>,

    /// Workload profile id (olap, oltp, realtime, datalake)
    #[arg(short, long)]
    pub workload: Option<String>,

    /// Region id (e.g. us-east, eu-west)
    #[arg(short, long)]
    pub region: Option<String>,

    /// Pricing model (on-demand, reserved, spot, hybrid)
    #[arg(short, long)]
    pub pricing: Option<PricingModel>,

    /// Share of capacity on reserved pricing, 0-100 (hybrid pricing)
    #[arg(long)]
    pub reserved_percentage: Option<f64>,

    /// Query complexity (simple, moderate, complex)
    #[arg(long)]
    pub complexity: Option<QueryComplexity>,

    /// Ingestion cadence (batch, hourly, realtime, on-demand)
    #[arg(long)]
    pub ingestion: Option<IngestionType>,

    /// SLA requirement (best-effort, standard, premium, mission-critical)
    #[arg(long)]
    pub sla: Option<SlaRequirement>,

    /// Peak usage multiplier
    #[arg(long)]
    pub peak_usage: Option<f64>,

    /// Annual data growth rate in percent
    #[arg(long)]
    pub growth_rate: Option<f64>,

    /// Size for this tier instead of the classified one
    #[arg(long)]
    pub tier: Option<Tier>,
}

impl SizingArgs {
    /// Build the configuration: file or preset first, then flag overrides.
    pub fn build(&self) -> Result<SizingConfig> {
        let mut config = match &self.config {
            Some(path) => SizingConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => self.preset.unwrap_or_default().config(),
        };
        if let (Some(preset), Some(_)) = (self.preset, &self.config) {
            config = preset.apply(config);
        }

        if let Some(gb) = self.data_volume {
            config.data_volume_gb = gb;
        }
        if let Some(users) = self.users {
            config.concurrent_users = users;
        }
        if let Some(workload) = &self.workload {
            config.workload_profile = workload.clone();
        }
        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(pricing) = self.pricing {
            config.pricing_model = pricing;
        }
        if let Some(pct) = self.reserved_percentage {
            config.reserved_percentage = Some(pct);
        }
        if let Some(complexity) = self.complexity {
            config.query_complexity = complexity;
        }
        if let Some(ingestion) = self.ingestion {
            config.ingestion_type = ingestion;
        }
        if let Some(sla) = self.sla {
            config.sla_requirement = sla;
        }
        if let Some(peak) = self.peak_usage {
            config.peak_usage_multiplier = peak;
        }
        if let Some(growth) = self.growth_rate {
            config.growth_rate_percent = growth;
        }
        if let Some(tier) = self.tier {
            config.tier_override = Some(tier);
        }

        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}
