//! JSON report document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sizer_core::{
    CostBreakdown, IngestionType, PerformanceMetrics, PlatformRecommendation, PricingModel, QueryComplexity,
    Region, SlaRequirement, Tier, WorkloadProfile,
};

use crate::context::{ReportContext, REPORT_TITLE, REPORT_VERSION};
use crate::error::ReportResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub title: String,
}

/// Configuration as entered, with the region and workload rows expanded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfiguration {
    #[serde(rename = "dataVolumeGB")]
    pub data_volume_gb: f64,
    #[serde(rename = "dataVolumeTB")]
    pub data_volume_tb: f64,
    pub concurrent_users: u32,
    pub workload_profile: WorkloadProfile,
    pub region: Region,
    pub pricing_model: PricingModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_percentage: Option<f64>,
    pub query_complexity: QueryComplexity,
    pub ingestion_type: IngestionType,
    pub sla_requirement: SlaRequirement,
    pub peak_usage_multiplier: f64,
    pub growth_rate_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecommendations {
    pub tier: Tier,
    pub fabric: PlatformRecommendation,
    pub synapse: PlatformRecommendation,
    pub databricks: PlatformRecommendation,
}

/// Top-level JSON report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub metadata: ReportMetadata,
    pub configuration: ReportConfiguration,
    pub recommendations: ReportRecommendations,
    pub cost_breakdown: CostBreakdown,
    pub performance_metrics: PerformanceMetrics,
    pub warnings: Vec<String>,
    pub benefits: Vec<String>,
}

impl JsonReport {
    pub fn build(ctx: &ReportContext<'_>, generated_at: DateTime<Utc>) -> Self {
        let config = ctx.config;
        let result = ctx.result;

        Self {
            metadata: ReportMetadata {
                version: REPORT_VERSION.to_string(),
                generated_at,
                title: REPORT_TITLE.to_string(),
            },
            configuration: ReportConfiguration {
                data_volume_gb: config.data_volume_gb,
                data_volume_tb: config.data_volume_tb(),
                concurrent_users: config.concurrent_users,
                workload_profile: ctx.workload.clone(),
                region: ctx.region.clone(),
                pricing_model: config.pricing_model,
                reserved_percentage: config.reserved_percentage,
                query_complexity: config.query_complexity,
                ingestion_type: config.ingestion_type,
                sla_requirement: config.sla_requirement,
                peak_usage_multiplier: config.peak_usage_multiplier,
                growth_rate_percent: config.growth_rate_percent,
            },
            recommendations: ReportRecommendations {
                tier: result.tier,
                fabric: result.fabric.clone(),
                synapse: result.synapse.clone(),
                databricks: result.databricks.clone(),
            },
            cost_breakdown: result.cost_breakdown.clone(),
            performance_metrics: result.performance_metrics.clone(),
            warnings: result.warnings.clone(),
            benefits: result.benefits.clone(),
        }
    }
}

/// Render the JSON report, pretty-printed.
pub fn render_json(ctx: &ReportContext<'_>, generated_at: DateTime<Utc>) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::build(ctx, generated_at))?)
}
