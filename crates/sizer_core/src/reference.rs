//! Static reference data: regions, workload profiles, and the bundle handed
//! to the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{SizerResult, SizingError};
use crate::models::WorkloadCategory;

/// Broad geography a region belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Geography {
    Americas,
    Europe,
    AsiaPacific,
}

impl fmt::Display for Geography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geography::Americas => write!(f, "Americas"),
            Geography::Europe => write!(f, "Europe"),
            Geography::AsiaPacific => write!(f, "Asia Pacific"),
        }
    }
}

/// A deployment region with its price multiplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    pub name: String,
    /// Provider region code (e.g. `eastus`)
    pub code: String,
    pub geography: Geography,
    /// Applied multiplicatively to catalog list prices
    pub pricing_multiplier: f64,
    pub currency: String,
    pub symbol: String,
}

impl Region {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        code: impl Into<String>,
        geography: Geography,
        pricing_multiplier: f64,
        currency: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            geography,
            pricing_multiplier,
            currency: currency.into(),
            symbol: symbol.into(),
        }
    }

    /// Format an amount in this region's currency, e.g. `€1,234.50`.
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{}", self.symbol, group_thousands(amount))
    }
}

fn group_thousands(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// Resource intensity profile of a workload, each intensity in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: WorkloadCategory,
    pub cpu_intensity: f64,
    pub memory_intensity: f64,
    pub io_intensity: f64,
}

/// Built-in deployment regions. The first entry is the default.
pub fn builtin_regions() -> Vec<Region> {
    vec![
        Region::new("us-east", "US East (Virginia)", "eastus", Geography::Americas, 1.0, "USD", "$"),
        Region::new("us-west", "US West (California)", "westus", Geography::Americas, 1.05, "USD", "$"),
        Region::new("eu-west", "EU West (Ireland)", "westeurope", Geography::Europe, 1.15, "EUR", "€"),
        Region::new("eu-central", "EU Central (Germany)", "germanycentral", Geography::Europe, 1.2, "EUR", "€"),
        Region::new("ap-southeast", "Asia Pacific (Singapore)", "southeastasia", Geography::AsiaPacific, 1.25, "SGD", "S$"),
        Region::new("ap-northeast", "Asia Pacific (Japan)", "japaneast", Geography::AsiaPacific, 1.3, "JPY", "¥"),
        Region::new("ca-central", "Canada (Central)", "canadacentral", Geography::Americas, 1.08, "CAD", "C$"),
        Region::new("au-east", "Australia (East)", "australiaeast", Geography::AsiaPacific, 1.35, "AUD", "A$"),
    ]
}

/// Built-in workload profiles. The first entry is the default.
pub fn builtin_workloads() -> Vec<WorkloadProfile> {
    let profile = |id: &str, name: &str, description: &str, category, cpu, memory, io| WorkloadProfile {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        cpu_intensity: cpu,
        memory_intensity: memory,
        io_intensity: io,
    };

    vec![
        profile(
            "olap",
            "OLAP (Analytical)",
            "Online Analytical Processing - Complex queries, large scans, batch operations",
            WorkloadCategory::Olap,
            0.8,
            0.9,
            0.7,
        ),
        profile(
            "oltp",
            "OLTP (Transactional)",
            "Online Transaction Processing - Short queries, frequent updates, high concurrency",
            WorkloadCategory::Oltp,
            0.6,
            0.5,
            0.8,
        ),
        profile(
            "realtime",
            "Real-time Analytics",
            "Streaming data ingestion with immediate query availability",
            WorkloadCategory::RealTime,
            0.9,
            0.8,
            0.9,
        ),
        profile(
            "datalake",
            "Data Lake",
            "Large-scale data storage with exploratory queries and ML workloads",
            WorkloadCategory::DataLake,
            0.7,
            0.6,
            0.6,
        ),
    ]
}

/// Read-only lookup tables supplied to the engine at startup.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    catalog: Catalog,
    regions: Vec<Region>,
    workloads: Vec<WorkloadProfile>,
}

impl ReferenceData {
    /// Bundle custom tables, rejecting regions with a non-positive multiplier
    /// and empty region or workload tables.
    pub fn new(catalog: Catalog, regions: Vec<Region>, workloads: Vec<WorkloadProfile>) -> SizerResult<Self> {
        if regions.is_empty() {
            return Err(SizingError::InvalidCatalog("no regions defined".to_string()));
        }
        if workloads.is_empty() {
            return Err(SizingError::InvalidCatalog("no workload profiles defined".to_string()));
        }
        for region in &regions {
            if !(region.pricing_multiplier.is_finite() && region.pricing_multiplier > 0.0) {
                return Err(SizingError::InvalidRegion {
                    id: region.id.clone(),
                    multiplier: region.pricing_multiplier,
                });
            }
        }
        for profile in &workloads {
            let intensities = [profile.cpu_intensity, profile.memory_intensity, profile.io_intensity];
            if intensities.iter().any(|v| !(0.0..=1.0).contains(v)) {
                return Err(SizingError::InvalidCatalog(format!(
                    "workload profile '{}' has an intensity outside 0-1",
                    profile.id
                )));
            }
        }

        Ok(Self {
            catalog,
            regions,
            workloads,
        })
    }

    /// The built-in catalog, regions and workload profiles.
    pub fn builtin() -> Self {
        Self {
            catalog: Catalog::builtin(),
            regions: builtin_regions(),
            workloads: builtin_workloads(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn workloads(&self) -> &[WorkloadProfile] {
        &self.workloads
    }

    pub fn region(&self, id: &str) -> SizerResult<&Region> {
        self.regions
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| SizingError::UnknownRegion(id.to_string()))
    }

    /// Format `amount` in the currency of `region_id`. Unknown ids use the
    /// default region.
    pub fn format_amount(&self, region_id: &str, amount: f64) -> String {
        self.region(region_id)
            .unwrap_or_else(|_| self.default_region())
            .format_amount(amount)
    }

    pub fn regions_in(&self, geography: Geography) -> Vec<&Region> {
        self.regions.iter().filter(|r| r.geography == geography).collect()
    }

    pub fn default_region(&self) -> &Region {
        &self.regions[0]
    }

    pub fn workload(&self, id: &str) -> SizerResult<&WorkloadProfile> {
        self.workloads
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| SizingError::UnknownWorkloadProfile(id.to_string()))
    }

    pub fn default_workload(&self) -> &WorkloadProfile {
        &self.workloads[0]
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_lookup() {
        let data = ReferenceData::builtin();
        let region = data.region("eu-west").unwrap();
        assert_eq!(region.pricing_multiplier, 1.15);
        assert_eq!(region.symbol, "€");
        assert!(matches!(data.region("mars-north"), Err(SizingError::UnknownRegion(_))));
        assert_eq!(data.default_region().id, "us-east");
    }

    #[test]
    fn test_format_amount_by_region_id() {
        let data = ReferenceData::builtin();
        assert_eq!(data.format_amount("eu-west", 1234.5), "€1,234.50");
        assert_eq!(data.format_amount("ap-northeast", 99.0), "¥99.00");
        assert_eq!(data.format_amount("mars-north", 1000000.0), "$1,000,000.00");
    }

    #[test]
    fn test_regions_by_geography() {
        let data = ReferenceData::builtin();
        let americas: Vec<_> = data.regions_in(Geography::Americas).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(americas, vec!["us-east", "us-west", "ca-central"]);
        assert_eq!(data.regions_in(Geography::AsiaPacific).len(), 3);
    }

    #[test]
    fn test_workload_lookup() {
        let data = ReferenceData::builtin();
        assert_eq!(data.workload("realtime").unwrap().cpu_intensity, 0.9);
        assert_eq!(data.default_workload().id, "olap");
        assert!(data.workload("gaming").is_err());
    }

    #[test]
    fn test_rejects_non_positive_region_multiplier() {
        let mut regions = builtin_regions();
        regions[1].pricing_multiplier = 0.0;
        let result = ReferenceData::new(Catalog::builtin(), regions, builtin_workloads());
        assert!(matches!(result, Err(SizingError::InvalidRegion { .. })));
    }

    #[test]
    fn test_format_amount() {
        let data = ReferenceData::builtin();
        let region = data.region("eu-central").unwrap();
        assert_eq!(region.format_amount(1234567.891), "€1,234,567.89");
        assert_eq!(region.format_amount(12.5), "€12.50");
    }
}
