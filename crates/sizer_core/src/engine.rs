//! Top-level sizing engine.
//!
//! A configuration flows through tier classification, then into each
//! platform sizing function independently, and the three recommendations
//! feed cost aggregation, performance estimation and the advisory rules.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::advisories::{AdvisoryContext, AdvisoryRules};
use crate::config::SizingConfig;
use crate::cost::{aggregate_costs, CostBreakdown};
use crate::error::SizerResult;
use crate::models::{Platform, Tier};
use crate::multipliers::MultiplierSet;
use crate::performance::{estimate_performance, PerformanceMetrics};
use crate::pricing::PricingTerms;
use crate::reference::ReferenceData;
use crate::scenarios::ComparisonScenario;
use crate::sizing::{size_for_platform, PlatformRecommendation, RequirementInputs};
use crate::tier::{classify_tier, tier_score};

/// Everything computed for one configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SizingResult {
    /// Tier the platforms were sized for
    pub tier: Tier,
    /// Tier from classification, before any override
    pub classified_tier: Tier,
    pub tier_score: f64,
    pub fabric: PlatformRecommendation,
    pub synapse: PlatformRecommendation,
    pub databricks: PlatformRecommendation,
    pub cost_breakdown: CostBreakdown,
    pub performance_metrics: PerformanceMetrics,
    pub warnings: Vec<String>,
    pub benefits: Vec<String>,
    pub multipliers: MultiplierSet,
}

impl SizingResult {
    pub fn recommendation(&self, platform: Platform) -> &PlatformRecommendation {
        match platform {
            Platform::Fabric => &self.fabric,
            Platform::Synapse => &self.synapse,
            Platform::Databricks => &self.databricks,
        }
    }

    /// Recommendations in platform order.
    pub fn recommendations(&self) -> [&PlatformRecommendation; 3] {
        [&self.fabric, &self.synapse, &self.databricks]
    }

    pub fn is_saturated(&self) -> bool {
        self.recommendations().iter().any(|r| r.saturated)
    }

    /// The recommendation with the lowest monthly price.
    pub fn cheapest(&self) -> &PlatformRecommendation {
        let [fabric, synapse, databricks] = self.recommendations();
        [synapse, databricks]
            .into_iter()
            .fold(fabric, |best, r| if r.monthly_price() < best.monthly_price() { r } else { best })
    }
}

/// A comparison scenario with its computed result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub scenario: ComparisonScenario,
    pub result: SizingResult,
}

/// Sizing engine over a fixed set of reference data.
#[derive(Debug, Clone)]
pub struct SizingEngine {
    reference: ReferenceData,
    rules: AdvisoryRules,
}

impl Default for SizingEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SizingEngine {
    pub fn new(reference: ReferenceData) -> Self {
        Self {
            reference,
            rules: AdvisoryRules::standard(),
        }
    }

    /// Engine over the built-in catalog, regions and workload profiles.
    pub fn builtin() -> Self {
        Self::new(ReferenceData::builtin())
    }

    pub fn with_rules(mut self, rules: AdvisoryRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Compute the sizing result for `config`.
    ///
    /// The configuration is validated and resolved first; on error nothing
    /// is computed. The same configuration always yields the same result.
    pub fn compute(&self, config: &SizingConfig) -> SizerResult<SizingResult> {
        let (region, profile) = config.resolve(&self.reference)?;

        let tier_score = tier_score(config.data_volume_gb, config.concurrent_users);
        let classified_tier = classify_tier(config.data_volume_gb, config.concurrent_users);
        let tier = config.tier_override.unwrap_or(classified_tier);
        info!(
            "Sizing {:.0} GB for {} users in {}: {} tier (score {:.2})",
            config.data_volume_gb, config.concurrent_users, region.id, tier, tier_score
        );
        if tier != classified_tier {
            debug!("Tier overridden from {} to {}", classified_tier, tier);
        }

        let inputs = RequirementInputs::from_config(config, tier);
        let terms = PricingTerms::new(config.pricing_model, config.reserved_percentage);
        let catalog = self.reference.catalog();

        let fabric = size_for_platform(Platform::Fabric, &inputs, catalog, region, terms)?;
        let synapse = size_for_platform(Platform::Synapse, &inputs, catalog, region, terms)?;
        let databricks = size_for_platform(Platform::Databricks, &inputs, catalog, region, terms)?;

        let cost_breakdown = aggregate_costs(
            &[&fabric, &synapse, &databricks],
            config.data_volume_gb,
            config.ingestion_type,
            config.pricing_model,
        );
        let performance_metrics = estimate_performance(tier, profile, config.concurrent_users);

        let saturated = [&fabric, &synapse, &databricks]
            .into_iter()
            .filter(|r| r.saturated)
            .map(|r| (r.platform, r.sku.clone()))
            .collect();
        let advisories = self.rules.evaluate(&AdvisoryContext {
            tier,
            concurrent_users: config.concurrent_users,
            ingestion_type: config.ingestion_type,
            data_volume_gb: config.data_volume_gb,
            query_complexity: config.query_complexity,
            pricing_model: config.pricing_model,
            saturated,
        });

        debug!(
            "Recommended {} / {} / {}, average monthly total {:.2}",
            fabric.sku, synapse.sku, databricks.sku, cost_breakdown.monthly_total
        );

        Ok(SizingResult {
            tier,
            classified_tier,
            tier_score,
            fabric,
            synapse,
            databricks,
            cost_breakdown,
            performance_metrics,
            warnings: advisories.warnings,
            benefits: advisories.benefits,
            multipliers: inputs.multipliers,
        })
    }

    /// Compute every scenario over an otherwise shared configuration.
    pub fn compare(&self, scenarios: &[ComparisonScenario], base: &SizingConfig) -> SizerResult<Vec<ScenarioOutcome>> {
        info!("Comparing {} scenarios", scenarios.len());
        scenarios
            .iter()
            .map(|scenario| {
                let result = self.compute(&scenario.apply(base))?;
                Ok(ScenarioOutcome {
                    scenario: scenario.clone(),
                    result,
                })
            })
            .collect()
    }
}

fn builtin_engine() -> &'static SizingEngine {
    static ENGINE: OnceLock<SizingEngine> = OnceLock::new();
    ENGINE.get_or_init(SizingEngine::builtin)
}

/// Compute a sizing result with the built-in reference data.
pub fn compute_sizing(config: &SizingConfig) -> SizerResult<SizingResult> {
    builtin_engine().compute(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SizingError;
    use crate::models::{IngestionType, PricingModel, QueryComplexity};

    #[test]
    fn test_compute_default_config() {
        let result = compute_sizing(&SizingConfig::default()).unwrap();
        assert_eq!(result.tier, Tier::Minimum);
        assert_eq!(result.classified_tier, Tier::Minimum);
        assert_eq!(result.multipliers.tier, 0.6);
        assert!(result.benefits.is_empty());
        assert!(!result.is_saturated());
    }

    #[test]
    fn test_tier_override_keeps_classification() {
        let config = SizingConfig::new(2048.0, 50).with_tier_override(Tier::Performance);
        let result = compute_sizing(&config).unwrap();
        assert_eq!(result.tier, Tier::Performance);
        assert_eq!(result.classified_tier, Tier::Minimum);
        assert_eq!(result.performance_metrics.burst_capability, Some(3.0));
        assert_eq!(result.benefits.len(), 3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = compute_sizing(&SizingConfig::new(100.0, 0)).unwrap_err();
        assert!(err.is_configuration_error());

        let err = compute_sizing(&SizingConfig::default().with_region("mars-1")).unwrap_err();
        assert!(matches!(err, SizingError::UnknownRegion(_)));
    }

    #[test]
    fn test_minimum_tier_warnings() {
        let config = SizingConfig::new(2048.0, 45)
            .with_complexity(QueryComplexity::Complex)
            .with_ingestion(IngestionType::Realtime);
        let result = compute_sizing(&config).unwrap();
        assert_eq!(result.tier, Tier::Minimum);
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn test_cheapest_and_lookup() {
        let config = SizingConfig::new(10240.0, 100).with_pricing(PricingModel::Reserved, None);
        let result = compute_sizing(&config).unwrap();
        let cheapest = result.cheapest();
        for rec in result.recommendations() {
            assert!(cheapest.monthly_price() <= rec.monthly_price());
        }
        assert_eq!(result.recommendation(Platform::Synapse).platform, Platform::Synapse);
        assert!(result.benefits.contains(&"30% savings with reserved capacity".to_string()));
    }

    #[test]
    fn test_compare_scenarios() {
        let engine = SizingEngine::builtin();
        let scenarios = crate::scenarios::builtin_scenarios();
        let outcomes = engine.compare(&scenarios, &SizingConfig::default()).unwrap();
        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[2].result.tier, Tier::Balanced);
        assert_eq!(outcomes[1].result.tier, Tier::Minimum);
    }
}
