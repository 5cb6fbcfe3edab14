//! Static comparison scenarios and the technical specification table.

use serde::{Deserialize, Serialize};

use crate::config::SizingConfig;
use crate::models::Platform;

/// A named volume and concurrency pair to compare.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonScenario {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "dataVolumeGB")]
    pub data_volume_gb: f64,
    pub concurrent_users: u32,
}

impl ComparisonScenario {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        data_volume_gb: f64,
        concurrent_users: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            data_volume_gb,
            concurrent_users,
        }
    }

    /// `base` with this scenario's volume and concurrency.
    pub fn apply(&self, base: &SizingConfig) -> SizingConfig {
        SizingConfig {
            data_volume_gb: self.data_volume_gb,
            concurrent_users: self.concurrent_users,
            ..base.clone()
        }
    }
}

pub fn builtin_scenarios() -> Vec<ComparisonScenario> {
    vec![
        ComparisonScenario::new(
            "scenario-1",
            "2TB Database + 50 Dashboards",
            "Mid-sized enterprise workload with high concurrency requirements",
            2048.0,
            50,
        ),
        ComparisonScenario::new(
            "scenario-2",
            "500GB + 10 Users",
            "Small departmental analytics workload",
            500.0,
            10,
        ),
        ComparisonScenario::new(
            "scenario-3",
            "50TB + 200 Users",
            "Large enterprise data warehouse",
            51200.0,
            200,
        ),
        ComparisonScenario::new(
            "scenario-4",
            "10TB + 100 Users",
            "Medium enterprise analytics platform",
            10240.0,
            100,
        ),
    ]
}

/// One feature described for each platform.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SpecificationRow {
    pub feature: &'static str,
    pub fabric: &'static str,
    pub synapse: &'static str,
    pub databricks: &'static str,
}

impl SpecificationRow {
    pub fn value(&self, platform: Platform) -> &'static str {
        match platform {
            Platform::Fabric => self.fabric,
            Platform::Synapse => self.synapse,
            Platform::Databricks => self.databricks,
        }
    }
}

const fn row(
    feature: &'static str,
    fabric: &'static str,
    synapse: &'static str,
    databricks: &'static str,
) -> SpecificationRow {
    SpecificationRow {
        feature,
        fabric,
        synapse,
        databricks,
    }
}

pub const TECHNICAL_SPECIFICATIONS: &[SpecificationRow] = &[
    row("Primary Unit", "64 Capacity Units (CU)", "1000 DWU", "24 DBUs (Medium)"),
    row("Compute Cores", "128 (Base) - 384 (Burst) vCores", "80 vCores", "Abstracted (Autoscaling)"),
    row("Memory", "Unified Pool", "600 GB Total", "Abstracted"),
    row("Concurrency", "Dynamic (Bursting)", "256 Slots (Static)", "20 Queries/Cluster (Scaling)"),
    row("Scaling Logic", "Bursting (3x)", "Manual Scaling", "Multi-Cluster Autoscaling"),
    row("Storage Capacity", "32 TB", "10 TB", "4 TB"),
    row("Query Latency (p50)", "< 100ms", "< 200ms", "< 150ms"),
    row("Throughput", "1000+ QPS", "500+ QPS", "750+ QPS"),
    row("Pricing Model", "Capacity-based", "DWU-based", "DBU-based"),
    row("Reserved Instance Discount", "Up to 30%", "Up to 35%", "Up to 40%"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scenarios() {
        let scenarios = builtin_scenarios();
        assert_eq!(scenarios.len(), 4);
        assert_eq!(scenarios[2].data_volume_gb, 51200.0);
        assert_eq!(scenarios[2].concurrent_users, 200);
    }

    #[test]
    fn test_apply_keeps_other_parameters() {
        let base = SizingConfig::default().with_region("eu-west");
        let config = builtin_scenarios()[1].apply(&base);
        assert_eq!(config.data_volume_gb, 500.0);
        assert_eq!(config.concurrent_users, 10);
        assert_eq!(config.region, "eu-west");
    }

    #[test]
    fn test_specification_lookup() {
        let scaling = TECHNICAL_SPECIFICATIONS
            .iter()
            .find(|r| r.feature == "Scaling Logic")
            .unwrap();
        assert_eq!(scaling.value(Platform::Synapse), "Manual Scaling");
    }
}
