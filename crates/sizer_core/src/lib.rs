//! # sizer_core
//!
//! Sizing and cost estimation for cloud data warehouse platforms.
//!
//! Given a [`SizingConfig`] (data volume, concurrency, query complexity,
//! ingestion cadence, region, pricing model) the engine classifies a tier,
//! recommends a SKU for each of Microsoft Fabric, Azure Synapse and Azure
//! Databricks, and derives a cost breakdown and synthetic performance
//! metrics. Every calculation is synchronous and pure.
//!
//! # Architecture
//!
//! - **Reference data**: SKU catalog, regions and workload profiles
//! - **Multipliers**: fixed scaling factors per configuration dimension
//! - **Tier classifier**: volume and concurrency bucketed into a tier
//! - **Platform sizing**: per-family requirement formula and SKU selection
//! - **Aggregation**: cost breakdown, performance metrics, advisories
//!
//! # Example
//!
//! ```rust,ignore
//! use sizer_core::{compute_sizing, PricingModel, SizingConfig};
//!
//! let config = SizingConfig::new(2048.0, 50).with_pricing(PricingModel::Reserved, None);
//! let result = compute_sizing(&config)?;
//! println!("{} tier, Fabric {}", result.tier, result.fabric.sku);
//! ```

pub mod advisories;
pub mod catalog;
pub mod config;
pub mod cost;
pub mod engine;
pub mod error;
pub mod models;
pub mod multipliers;
pub mod performance;
pub mod pricing;
pub mod reference;
pub mod scenarios;
pub mod sizing;
pub mod tier;

// Re-export main types for convenience
pub use advisories::{Advisories, AdvisoryContext, AdvisoryKind, AdvisoryRule, AdvisoryRules};
pub use catalog::{Catalog, SkuEntry, SkuSelection, SkuSpecs};
pub use config::{ConfigFormat, ConfigPreset, SizingConfig};
pub use cost::{aggregate_costs, CostBreakdown, CostCategory, CostComponent};
pub use engine::{compute_sizing, ScenarioOutcome, SizingEngine, SizingResult};
pub use error::{SizerResult, SizingError};
pub use models::{
    CapacityUnit, IngestionType, Platform, PricingModel, QueryComplexity, ScalingType, SlaRequirement, Tier,
    WorkloadCategory,
};
pub use multipliers::{MultiplierSet, WorkloadDistribution};
pub use performance::{estimate_performance, PerformanceMetrics, QueryLatency};
pub use pricing::{apply_pricing_model, PriceQuote, PricingTerms};
pub use reference::{Geography, ReferenceData, Region, WorkloadProfile};
pub use scenarios::{builtin_scenarios, ComparisonScenario, SpecificationRow, TECHNICAL_SPECIFICATIONS};
pub use sizing::{size_for_platform, PlatformInfo, PlatformRecommendation, Requirement, RequirementInputs};
pub use tier::{classify_tier, tier_score};
