//! Sizing configuration: the immutable input to every calculation.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SizerResult, SizingError};
use crate::models::{IngestionType, PricingModel, QueryComplexity, SlaRequirement, Tier};
use crate::multipliers::{
    complexity_multiplier, growth_adjustment, ingestion_multiplier, sla_multiplier, tier_multiplier,
    MultiplierSet, WorkloadDistribution,
};
use crate::reference::{ReferenceData, Region, WorkloadProfile};

pub const DEFAULT_DATA_VOLUME_GB: f64 = 1024.0;
pub const DEFAULT_CONCURRENT_USERS: u32 = 20;
pub const DEFAULT_REGION: &str = "us-east";
pub const DEFAULT_WORKLOAD_PROFILE: &str = "olap";
pub const DEFAULT_PEAK_USAGE_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_GROWTH_RATE_PERCENT: f64 = 20.0;

/// User-entered sizing parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SizingConfig {
    #[serde(rename = "dataVolumeGB", alias = "dataVolumeGb")]
    pub data_volume_gb: f64,
    pub concurrent_users: u32,
    /// Workload profile id
    pub workload_profile: String,
    /// Region id
    pub region: String,
    pub pricing_model: PricingModel,
    /// Share of capacity on reserved pricing (0-100), used by hybrid pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_percentage: Option<f64>,
    pub query_complexity: QueryComplexity,
    pub ingestion_type: IngestionType,
    pub sla_requirement: SlaRequirement,
    pub peak_usage_multiplier: f64,
    pub growth_rate_percent: f64,
    /// Size for this tier instead of the classified one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_override: Option<Tier>,
    /// `None` leaves the workload factor neutral
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload_distribution: Option<WorkloadDistribution>,
}

impl Default for SizingConfig {
    fn default() -> Self {
        ConfigPreset::Simple.config()
    }
}

impl SizingConfig {
    /// Simple-preset configuration for a volume and user count.
    pub fn new(data_volume_gb: f64, concurrent_users: u32) -> Self {
        Self {
            data_volume_gb,
            concurrent_users,
            ..Self::default()
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_workload_profile(mut self, profile: impl Into<String>) -> Self {
        self.workload_profile = profile.into();
        self
    }

    pub fn with_pricing(mut self, model: PricingModel, reserved_percentage: Option<f64>) -> Self {
        self.pricing_model = model;
        self.reserved_percentage = reserved_percentage;
        self
    }

    pub fn with_complexity(mut self, complexity: QueryComplexity) -> Self {
        self.query_complexity = complexity;
        self
    }

    pub fn with_ingestion(mut self, ingestion: IngestionType) -> Self {
        self.ingestion_type = ingestion;
        self
    }

    pub fn with_sla(mut self, sla: SlaRequirement) -> Self {
        self.sla_requirement = sla;
        self
    }

    pub fn with_peak_usage(mut self, multiplier: f64) -> Self {
        self.peak_usage_multiplier = multiplier;
        self
    }

    pub fn with_growth_rate(mut self, percent: f64) -> Self {
        self.growth_rate_percent = percent;
        self
    }

    pub fn with_distribution(mut self, distribution: WorkloadDistribution) -> Self {
        self.workload_distribution = Some(distribution);
        self
    }

    pub fn with_tier_override(mut self, tier: Tier) -> Self {
        self.tier_override = Some(tier);
        self
    }

    pub fn data_volume_tb(&self) -> f64 {
        self.data_volume_gb / 1024.0
    }

    /// Check ranges that do not depend on reference data.
    ///
    /// Nothing is applied when validation fails.
    pub fn validate(&self) -> SizerResult<()> {
        if !self.data_volume_gb.is_finite() || self.data_volume_gb < 0.0 {
            return Err(SizingError::InvalidDataVolume(self.data_volume_gb));
        }
        if self.concurrent_users == 0 {
            return Err(SizingError::InvalidConcurrency(self.concurrent_users));
        }
        if !self.peak_usage_multiplier.is_finite() || self.peak_usage_multiplier <= 0.0 {
            return Err(SizingError::InvalidPeakUsage(self.peak_usage_multiplier));
        }
        if !self.growth_rate_percent.is_finite() || self.growth_rate_percent <= -100.0 {
            return Err(SizingError::InvalidGrowthRate(self.growth_rate_percent));
        }
        if let Some(distribution) = &self.workload_distribution {
            distribution.validate()?;
        }
        match self.reserved_percentage {
            Some(pct) if !pct.is_finite() || !(0.0..=100.0).contains(&pct) => {
                return Err(SizingError::InvalidReservedPercentage(format!(
                    "{} is outside 0-100",
                    pct
                )));
            }
            None if self.pricing_model == PricingModel::Hybrid => {
                return Err(SizingError::InvalidReservedPercentage(
                    "hybrid pricing requires a reserved percentage".to_string(),
                ));
            }
            _ => {}
        }
        Ok(())
    }

    /// Validate and look up the region and workload profile.
    pub fn resolve<'a>(&self, reference: &'a ReferenceData) -> SizerResult<(&'a Region, &'a WorkloadProfile)> {
        self.validate()?;
        let region = reference.region(&self.region)?;
        let profile = reference.workload(&self.workload_profile)?;
        Ok((region, profile))
    }

    /// Resolve every scaling factor for sizing at `tier`.
    pub fn multipliers(&self, tier: Tier) -> MultiplierSet {
        MultiplierSet {
            complexity: complexity_multiplier(self.query_complexity),
            ingestion: ingestion_multiplier(self.ingestion_type),
            peak_usage: self.peak_usage_multiplier,
            sla: sla_multiplier(self.sla_requirement),
            workload: self
                .workload_distribution
                .map(|d| d.multiplier())
                .unwrap_or(1.0),
            growth: growth_adjustment(self.growth_rate_percent),
            tier: tier_multiplier(tier),
        }
    }

    /// Load a configuration file; the extension selects the format.
    pub fn from_file(path: impl AsRef<Path>) -> SizerResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        debug!("Reading {} sizing configuration from {:?}", format, path);

        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    pub fn parse(content: &str, format: ConfigFormat) -> SizerResult<Self> {
        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Write the configuration to a file; the extension selects the format.
    pub fn save(&self, path: impl AsRef<Path>) -> SizerResult<()> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = match format {
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };
        fs::write(path, content)?;
        Ok(())
    }
}

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> SizerResult<Self> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(SizingError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Yaml => write!(f, "YAML"),
            ConfigFormat::Json => write!(f, "JSON"),
            ConfigFormat::Toml => write!(f, "TOML"),
        }
    }
}

/// Named starting points of the one calculation engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfigPreset {
    /// Basic parameters only; every advanced factor is neutral.
    #[default]
    Simple,
    /// Product defaults for peak usage, growth and workload mix.
    Advanced,
}

impl ConfigPreset {
    /// Default configuration for this preset.
    pub fn config(self) -> SizingConfig {
        let base = SizingConfig {
            data_volume_gb: DEFAULT_DATA_VOLUME_GB,
            concurrent_users: DEFAULT_CONCURRENT_USERS,
            workload_profile: DEFAULT_WORKLOAD_PROFILE.to_string(),
            region: DEFAULT_REGION.to_string(),
            pricing_model: PricingModel::OnDemand,
            reserved_percentage: None,
            query_complexity: QueryComplexity::Simple,
            ingestion_type: IngestionType::Batch,
            sla_requirement: SlaRequirement::Standard,
            peak_usage_multiplier: 1.0,
            growth_rate_percent: 0.0,
            tier_override: None,
            workload_distribution: None,
        };
        self.apply(base)
    }

    /// Reset the advanced parameters of `config` to this preset's values,
    /// keeping the basic ones.
    pub fn apply(self, config: SizingConfig) -> SizingConfig {
        match self {
            ConfigPreset::Simple => SizingConfig {
                sla_requirement: SlaRequirement::Standard,
                peak_usage_multiplier: 1.0,
                growth_rate_percent: 0.0,
                workload_distribution: None,
                ..config
            },
            ConfigPreset::Advanced => SizingConfig {
                sla_requirement: SlaRequirement::Standard,
                peak_usage_multiplier: DEFAULT_PEAK_USAGE_MULTIPLIER,
                growth_rate_percent: DEFAULT_GROWTH_RATE_PERCENT,
                workload_distribution: Some(WorkloadDistribution::product_default()),
                ..config
            },
        }
    }
}

impl fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigPreset::Simple => write!(f, "simple"),
            ConfigPreset::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for ConfigPreset {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "basic" => Ok(ConfigPreset::Simple),
            "advanced" => Ok(ConfigPreset::Advanced),
            _ => Err(SizingError::UnknownValue {
                kind: "preset",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_preset_is_neutral() {
        let config = SizingConfig::default();
        let set = config.multipliers(Tier::Balanced);
        assert_eq!(set.combined(), 1.0);
        assert_eq!(config.data_volume_gb, 1024.0);
        assert_eq!(config.concurrent_users, 20);
    }

    #[test]
    fn test_advanced_preset_defaults() {
        let config = ConfigPreset::Advanced.config();
        let set = config.multipliers(Tier::Balanced);
        assert_eq!(set.peak_usage, 1.5);
        assert!((set.growth - 1.2).abs() < 1e-12);
        assert!((set.workload - 1.35).abs() < 1e-9);
    }

    #[test]
    fn test_apply_keeps_basic_parameters() {
        let config = SizingConfig::new(4096.0, 75).with_complexity(QueryComplexity::Complex);
        let advanced = ConfigPreset::Advanced.apply(config.clone());
        assert_eq!(advanced.data_volume_gb, 4096.0);
        assert_eq!(advanced.query_complexity, QueryComplexity::Complex);
        assert_eq!(ConfigPreset::Simple.apply(advanced), config);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        assert!(matches!(
            SizingConfig::new(-1.0, 10).validate(),
            Err(SizingError::InvalidDataVolume(_))
        ));
        assert!(matches!(
            SizingConfig::new(f64::NAN, 10).validate(),
            Err(SizingError::InvalidDataVolume(_))
        ));
        assert!(matches!(
            SizingConfig::new(100.0, 0).validate(),
            Err(SizingError::InvalidConcurrency(0))
        ));
        assert!(matches!(
            SizingConfig::new(100.0, 5).with_peak_usage(0.0).validate(),
            Err(SizingError::InvalidPeakUsage(_))
        ));
        assert!(matches!(
            SizingConfig::new(100.0, 5).with_growth_rate(-100.0).validate(),
            Err(SizingError::InvalidGrowthRate(_))
        ));
    }

    #[test]
    fn test_hybrid_requires_reserved_percentage() {
        let missing = SizingConfig::new(100.0, 5).with_pricing(PricingModel::Hybrid, None);
        assert!(matches!(missing.validate(), Err(SizingError::InvalidReservedPercentage(_))));

        let out_of_range = SizingConfig::new(100.0, 5).with_pricing(PricingModel::Hybrid, Some(120.0));
        assert!(out_of_range.validate().is_err());

        let ok = SizingConfig::new(100.0, 5).with_pricing(PricingModel::Hybrid, Some(50.0));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_parse_formats() {
        let yaml = "dataVolumeGB: 2048\nconcurrentUsers: 50\nqueryComplexity: complex\ningestionType: streaming\n";
        let config = SizingConfig::parse(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.data_volume_gb, 2048.0);
        assert_eq!(config.ingestion_type, IngestionType::Realtime);
        assert_eq!(config.region, DEFAULT_REGION);

        let json = r#"{"dataVolumeGB": 512, "concurrentUsers": 10, "pricingModel": "reserved"}"#;
        let config = SizingConfig::parse(json, ConfigFormat::Json).unwrap();
        assert_eq!(config.pricing_model, PricingModel::Reserved);

        let toml = "dataVolumeGb = 100.0\nconcurrentUsers = 3\nslaRequirement = \"premium\"\n";
        let config = SizingConfig::parse(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.sla_requirement, SlaRequirement::Premium);
    }

    #[test]
    fn test_unknown_enum_in_file_is_an_error() {
        let json = r#"{"queryComplexity": "extreme"}"#;
        assert!(matches!(
            SizingConfig::parse(json, ConfigFormat::Json),
            Err(SizingError::Json(_))
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")).unwrap(), ConfigFormat::Toml);
        assert!(ConfigFormat::from_path(Path::new("a.ini")).is_err());
    }
}
