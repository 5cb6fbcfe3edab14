//! Per-platform sizing: raw requirement, multipliers, catalog selection.
//!
//! Each platform family has its own linear requirement formula. The final
//! score is converted into the catalog's capacity unit and the smallest
//! entry meeting it is selected; when no entry is large enough the largest
//! one is returned and the recommendation is flagged as saturated.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{Catalog, SkuSpecs};
use crate::config::SizingConfig;
use crate::error::SizerResult;
use crate::models::{CapacityUnit, Platform, QueryComplexity, Tier};
use crate::multipliers::{complexity_multiplier, MultiplierSet};
use crate::pricing::{PriceQuote, PricingTerms};
use crate::reference::Region;

/// Score points per Fabric capacity unit.
const FABRIC_SCORE_PER_CU: f64 = 3.75;
/// Score points per Databricks DBU.
const DATABRICKS_SCORE_PER_DBU: f64 = 3.125;

/// The subset of a configuration that drives capacity requirements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequirementInputs {
    pub data_tb: f64,
    pub concurrent_users: u32,
    pub complexity: QueryComplexity,
    pub multipliers: MultiplierSet,
}

impl RequirementInputs {
    pub fn new(data_tb: f64, concurrent_users: u32, complexity: QueryComplexity, multipliers: MultiplierSet) -> Self {
        Self {
            data_tb,
            concurrent_users,
            complexity,
            multipliers,
        }
    }

    /// Derive requirement inputs for sizing `config` at `tier`.
    pub fn from_config(config: &SizingConfig, tier: Tier) -> Self {
        Self::new(
            config.data_volume_tb(),
            config.concurrent_users,
            config.query_complexity,
            config.multipliers(tier),
        )
    }

    fn users(&self) -> f64 {
        self.concurrent_users as f64
    }
}

/// How a platform's requirement was computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Score from the platform's linear formula, before multipliers
    pub raw_score: f64,
    /// Score after every applicable multiplier
    pub adjusted_score: f64,
    /// Adjusted score in the catalog's capacity unit
    pub required_units: f64,
}

/// Burst-capacity family: `tb*2 + users*0.5`, every multiplier applies.
pub fn fabric_requirement(inputs: &RequirementInputs) -> Requirement {
    let raw_score = inputs.data_tb * 2.0 + inputs.users() * 0.5;
    let adjusted_score = raw_score * inputs.multipliers.combined();
    Requirement {
        raw_score,
        adjusted_score,
        required_units: adjusted_score / FABRIC_SCORE_PER_CU,
    }
}

/// Warehouse-unit family: DWU is the larger of storage-driven and
/// slot-driven demand. Complexity sets the slots per user rather than
/// multiplying the score.
pub fn synapse_requirement(inputs: &RequirementInputs) -> Requirement {
    let slots_per_user = if complexity_multiplier(inputs.complexity) > 1.5 { 5.0 } else { 3.0 };
    let required_slots = inputs.users() * slots_per_user;
    let raw_score = (inputs.data_tb * 100.0).max(required_slots * 15.0);
    let adjusted_score = raw_score * inputs.multipliers.without_complexity();
    Requirement {
        raw_score,
        adjusted_score,
        required_units: adjusted_score,
    }
}

/// Elastic-cluster family: `tb*1.5 + users*0.8`, every multiplier applies.
pub fn databricks_requirement(inputs: &RequirementInputs) -> Requirement {
    let raw_score = inputs.data_tb * 1.5 + inputs.users() * 0.8;
    let adjusted_score = raw_score * inputs.multipliers.combined();
    Requirement {
        raw_score,
        adjusted_score,
        required_units: adjusted_score / DATABRICKS_SCORE_PER_DBU,
    }
}

pub fn requirement_for(platform: Platform, inputs: &RequirementInputs) -> Requirement {
    match platform {
        Platform::Fabric => fabric_requirement(inputs),
        Platform::Synapse => synapse_requirement(inputs),
        Platform::Databricks => databricks_requirement(inputs),
    }
}

/// Fixed descriptive text about a platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfo {
    pub description: String,
    pub key_features: Vec<String>,
    pub use_cases: Vec<String>,
    pub scaling_notes: String,
}

impl PlatformInfo {
    pub fn for_platform(platform: Platform) -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        match platform {
            Platform::Fabric => Self {
                description: "Microsoft Fabric is an integrated analytics platform combining Power BI, Spark, \
                              Data Warehouse, and Real-time Analytics."
                    .to_string(),
                key_features: strings(&[
                    "Integrated Analytics Platform",
                    "Power BI Integration",
                    "Apache Spark Support",
                    "Data Warehouse",
                    "Real-time Analytics",
                    "Surge Protection",
                    "OneLake Storage",
                ]),
                use_cases: strings(&[
                    "Integrated analytics with Power BI",
                    "Spark-based data processing",
                    "Data warehouse analytics",
                    "Real-time data streaming",
                    "Multi-workload analytics",
                ]),
                scaling_notes: "Linear performance scaling with CU increases. Surge protection prevents cost \
                                overruns. Monitor via Capacity Metrics app."
                    .to_string(),
            },
            Platform::Synapse => Self {
                description: "Azure Synapse Analytics is an enterprise data warehouse with advanced query \
                              optimization and workload management."
                    .to_string(),
                key_features: strings(&[
                    "Enterprise Data Warehouse",
                    "Pause/Resume Compute",
                    "Workload Management",
                    "Advanced Query Optimization",
                    "Separate Compute & Storage",
                    "Massive Parallel Processing",
                    "PolyBase Integration",
                ]),
                use_cases: strings(&[
                    "Enterprise data warehouse",
                    "Complex analytics queries",
                    "BI and reporting",
                    "Data integration",
                    "Large-scale data processing",
                ]),
                scaling_notes: "Pause compute to save costs. Linear performance scaling with DWU increases. \
                                Requires minimum 1TB for accurate testing."
                    .to_string(),
            },
            Platform::Databricks => Self {
                description: "Azure Databricks is a data lakehouse platform supporting data engineering, \
                              analytics, and machine learning."
                    .to_string(),
                key_features: strings(&[
                    "Data Lakehouse Architecture",
                    "Apache Spark & Delta Lake",
                    "Machine Learning & AI",
                    "Serverless Option",
                    "Autoscaling",
                    "Photon Engine",
                    "Collaborative Notebooks",
                ]),
                use_cases: strings(&[
                    "Data lakehouse implementation",
                    "Machine learning pipelines",
                    "Advanced analytics",
                    "Data engineering",
                    "Real-time streaming analytics",
                ]),
                scaling_notes: "Autoscaling reduces idle costs. Serverless option recommended for most \
                                workloads. Photon engine beneficial for SQL and complex transformations."
                    .to_string(),
            },
        }
    }
}

/// Recommended SKU for one platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRecommendation {
    pub platform: Platform,
    pub sku: String,
    pub sku_id: String,
    /// Capacity of the selected SKU
    pub compute_units: u32,
    pub capacity_unit: CapacityUnit,
    pub specs: SkuSpecs,
    pub requirement: Requirement,
    /// Requirement exceeded the largest catalog entry
    pub saturated: bool,
    pub pricing: PriceQuote,
    pub info: PlatformInfo,
}

impl PlatformRecommendation {
    pub fn monthly_price(&self) -> f64 {
        self.pricing.monthly_price
    }

    pub fn memory(&self) -> String {
        format!("{} GB", self.specs.memory_gb)
    }
}

/// Size one platform: compute its requirement, pick a catalog entry and
/// price it in `region` under `terms`.
///
/// Pure function of its arguments; saturation is reported on the returned
/// recommendation, never as an error.
pub fn size_for_platform(
    platform: Platform,
    inputs: &RequirementInputs,
    catalog: &Catalog,
    region: &Region,
    terms: PricingTerms,
) -> SizerResult<PlatformRecommendation> {
    let requirement = requirement_for(platform, inputs);
    debug!(
        "{}: raw score {:.2}, adjusted {:.2}, {:.2} {} required",
        platform,
        requirement.raw_score,
        requirement.adjusted_score,
        requirement.required_units,
        platform.capacity_unit()
    );

    let selection = catalog.select(platform, requirement.required_units)?;
    let entry = selection.entry;
    if selection.saturated {
        warn!(
            "{} requirement of {:.0} {} exceeds the largest SKU {}",
            platform, requirement.required_units, entry.capacity_unit, entry.name
        );
    }

    Ok(PlatformRecommendation {
        platform,
        sku: entry.name.clone(),
        sku_id: entry.id.clone(),
        compute_units: entry.capacity,
        capacity_unit: entry.capacity_unit,
        specs: entry.specs.clone(),
        requirement,
        saturated: selection.saturated,
        pricing: terms.quote(entry.base_price, region.pricing_multiplier),
        info: PlatformInfo::for_platform(platform),
    })
}
