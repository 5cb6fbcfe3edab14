//! Closed vocabularies used by configurations and results.
//!
//! Every enum parses strictly from text: anything outside the known set is a
//! [`SizingError::UnknownValue`]. Validation happens once at the configuration
//! boundary so that downstream lookups are total.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SizingError;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['_', ' '], "-")
}

/// Analytics platform family.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Burst-scalable unified capacity (capacity units).
    Fabric,
    /// Manually scaled warehouse (data warehouse units).
    Synapse,
    /// Autoscaling cluster (DBU).
    Databricks,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Fabric, Platform::Synapse, Platform::Databricks];

    /// Short identifier used in keys and query strings.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Fabric => "fabric",
            Platform::Synapse => "synapse",
            Platform::Databricks => "databricks",
        }
    }

    /// Human-readable product name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Fabric => "Microsoft Fabric",
            Platform::Synapse => "Azure Synapse",
            Platform::Databricks => "Azure Databricks",
        }
    }

    /// Unit in which this platform's catalog capacity is expressed.
    pub fn capacity_unit(&self) -> CapacityUnit {
        match self {
            Platform::Fabric => CapacityUnit::CapacityUnit,
            Platform::Synapse => CapacityUnit::Dwu,
            Platform::Databricks => CapacityUnit::Dbu,
        }
    }

    /// How the platform scales once provisioned.
    pub fn scaling_type(&self) -> ScalingType {
        match self {
            Platform::Fabric => ScalingType::Burst,
            Platform::Synapse => ScalingType::Manual,
            Platform::Databricks => ScalingType::Auto,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Platform {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "fabric" => Ok(Platform::Fabric),
            "synapse" => Ok(Platform::Synapse),
            "databricks" => Ok(Platform::Databricks),
            _ => Err(SizingError::unknown("platform", s)),
        }
    }
}

/// Coarse sizing classification. Ordered from smallest to largest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Minimum,
    Balanced,
    Performance,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Minimum, Tier::Balanced, Tier::Performance];

    /// Zero-based rank; higher means more capacity.
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Minimum => 0,
            Tier::Balanced => 1,
            Tier::Performance => 2,
        }
    }

    /// Short description shown next to the tier in reports.
    pub fn description(&self) -> &'static str {
        match self {
            Tier::Minimum => "Cost-effective, but risky for concurrency",
            Tier::Balanced => "Optimal balance of cost & performance",
            Tier::Performance => "Maximum speed & headroom",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Minimum => write!(f, "Minimum"),
            Tier::Balanced => write!(f, "Balanced"),
            Tier::Performance => write!(f, "Performance"),
        }
    }
}

impl FromStr for Tier {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "minimum" | "min" => Ok(Tier::Minimum),
            "balanced" => Ok(Tier::Balanced),
            "performance" | "perf" => Ok(Tier::Performance),
            _ => Err(SizingError::unknown("tier", s)),
        }
    }
}

/// Expected query complexity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryComplexity {
    #[default]
    Simple,
    Moderate,
    Complex,
}

impl QueryComplexity {
    pub const ALL: [QueryComplexity; 3] = [
        QueryComplexity::Simple,
        QueryComplexity::Moderate,
        QueryComplexity::Complex,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            QueryComplexity::Simple => "simple",
            QueryComplexity::Moderate => "moderate",
            QueryComplexity::Complex => "complex",
        }
    }
}

impl fmt::Display for QueryComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for QueryComplexity {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "simple" => Ok(QueryComplexity::Simple),
            "moderate" => Ok(QueryComplexity::Moderate),
            "complex" => Ok(QueryComplexity::Complex),
            _ => Err(SizingError::unknown("query complexity", s)),
        }
    }
}

/// Data ingestion cadence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum IngestionType {
    #[default]
    #[serde(rename = "batch")]
    Batch,
    #[serde(rename = "hourly")]
    Hourly,
    #[serde(rename = "realtime", alias = "streaming")]
    Realtime,
    #[serde(rename = "on-demand", alias = "ondemand")]
    OnDemand,
}

impl IngestionType {
    pub const ALL: [IngestionType; 4] = [
        IngestionType::Batch,
        IngestionType::Hourly,
        IngestionType::Realtime,
        IngestionType::OnDemand,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            IngestionType::Batch => "batch",
            IngestionType::Hourly => "hourly",
            IngestionType::Realtime => "realtime",
            IngestionType::OnDemand => "on-demand",
        }
    }

    /// Continuous ingestion; adds an ingestion cost component.
    pub fn is_streaming(&self) -> bool {
        matches!(self, IngestionType::Realtime)
    }
}

impl fmt::Display for IngestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for IngestionType {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "batch" => Ok(IngestionType::Batch),
            "hourly" => Ok(IngestionType::Hourly),
            "realtime" | "real-time" | "streaming" => Ok(IngestionType::Realtime),
            "on-demand" | "ondemand" => Ok(IngestionType::OnDemand),
            _ => Err(SizingError::unknown("ingestion type", s)),
        }
    }
}

/// Service-level requirement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SlaRequirement {
    BestEffort,
    #[default]
    Standard,
    Premium,
    MissionCritical,
}

impl SlaRequirement {
    pub const ALL: [SlaRequirement; 4] = [
        SlaRequirement::BestEffort,
        SlaRequirement::Standard,
        SlaRequirement::Premium,
        SlaRequirement::MissionCritical,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SlaRequirement::BestEffort => "best-effort",
            SlaRequirement::Standard => "standard",
            SlaRequirement::Premium => "premium",
            SlaRequirement::MissionCritical => "mission-critical",
        }
    }
}

impl fmt::Display for SlaRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for SlaRequirement {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "best-effort" | "besteffort" => Ok(SlaRequirement::BestEffort),
            "standard" => Ok(SlaRequirement::Standard),
            "premium" => Ok(SlaRequirement::Premium),
            "mission-critical" | "missioncritical" => Ok(SlaRequirement::MissionCritical),
            _ => Err(SizingError::unknown("SLA requirement", s)),
        }
    }
}

/// Commercial pricing model applied to list prices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModel {
    #[default]
    OnDemand,
    Reserved,
    Spot,
    Hybrid,
}

impl PricingModel {
    pub const ALL: [PricingModel; 4] = [
        PricingModel::OnDemand,
        PricingModel::Reserved,
        PricingModel::Spot,
        PricingModel::Hybrid,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PricingModel::OnDemand => "on-demand",
            PricingModel::Reserved => "reserved",
            PricingModel::Spot => "spot",
            PricingModel::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for PricingModel {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "on-demand" | "ondemand" | "payg" => Ok(PricingModel::OnDemand),
            "reserved" => Ok(PricingModel::Reserved),
            "spot" => Ok(PricingModel::Spot),
            "hybrid" => Ok(PricingModel::Hybrid),
            _ => Err(SizingError::unknown("pricing model", s)),
        }
    }
}

/// Scaling behaviour of a provisioned SKU.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScalingType {
    Manual,
    Auto,
    Burst,
}

impl fmt::Display for ScalingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingType::Manual => write!(f, "manual"),
            ScalingType::Auto => write!(f, "auto"),
            ScalingType::Burst => write!(f, "burst"),
        }
    }
}

/// Unit of catalog capacity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CapacityUnit {
    #[serde(rename = "cu")]
    CapacityUnit,
    Dwu,
    Dbu,
}

impl fmt::Display for CapacityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityUnit::CapacityUnit => write!(f, "CU"),
            CapacityUnit::Dwu => write!(f, "DWU"),
            CapacityUnit::Dbu => write!(f, "DBU"),
        }
    }
}

/// Broad category of a workload profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkloadCategory {
    #[serde(rename = "OLAP")]
    Olap,
    #[serde(rename = "OLTP")]
    Oltp,
    #[serde(rename = "RealTime")]
    RealTime,
    #[serde(rename = "DataLake")]
    DataLake,
}

impl fmt::Display for WorkloadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadCategory::Olap => write!(f, "OLAP"),
            WorkloadCategory::Oltp => write!(f, "OLTP"),
            WorkloadCategory::RealTime => write!(f, "RealTime"),
            WorkloadCategory::DataLake => write!(f, "DataLake"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_and_separator_insensitive() {
        assert_eq!("Mission_Critical".parse::<SlaRequirement>().unwrap(), SlaRequirement::MissionCritical);
        assert_eq!("ON DEMAND".parse::<PricingModel>().unwrap(), PricingModel::OnDemand);
        assert_eq!("streaming".parse::<IngestionType>().unwrap(), IngestionType::Realtime);
        assert_eq!("ondemand".parse::<IngestionType>().unwrap(), IngestionType::OnDemand);
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        let err = "extreme".parse::<QueryComplexity>().unwrap_err();
        assert!(matches!(err, SizingError::UnknownValue { kind: "query complexity", .. }));
        assert!("snowflake".parse::<Platform>().is_err());
        assert!("weekly".parse::<IngestionType>().is_err());
    }

    #[test]
    fn test_tier_ordering_follows_rank() {
        assert!(Tier::Minimum < Tier::Balanced);
        assert!(Tier::Balanced < Tier::Performance);
        for pair in Tier::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&PricingModel::OnDemand).unwrap(), "\"on-demand\"");
        assert_eq!(serde_json::to_string(&IngestionType::OnDemand).unwrap(), "\"on-demand\"");
        assert_eq!(serde_json::to_string(&Tier::Balanced).unwrap(), "\"balanced\"");
        assert_eq!(serde_json::to_string(&CapacityUnit::CapacityUnit).unwrap(), "\"cu\"");
        let parsed: IngestionType = serde_json::from_str("\"streaming\"").unwrap();
        assert_eq!(parsed, IngestionType::Realtime);
    }
}
