//! Warning and benefit rules evaluated against a sizing outcome.
//!
//! Each rule has a guard and a fixed message. Rules never interact; the
//! output keeps declaration order.

use std::fmt;

use tracing::debug;

use crate::models::{IngestionType, Platform, PricingModel, QueryComplexity, Tier};

/// Volume above which the minimum tier is flagged.
pub const MINIMUM_TIER_MAX_VOLUME_GB: f64 = 100_000.0;
/// Concurrency above which the minimum tier is flagged.
pub const MINIMUM_TIER_MAX_USERS: u32 = 30;

/// What a rule's guard can see.
#[derive(Debug, Clone)]
pub struct AdvisoryContext {
    pub tier: Tier,
    pub concurrent_users: u32,
    pub ingestion_type: IngestionType,
    pub data_volume_gb: f64,
    pub query_complexity: QueryComplexity,
    pub pricing_model: PricingModel,
    /// Platforms whose requirement exceeded the catalog, with the SKU returned
    pub saturated: Vec<(Platform, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryKind {
    Warning,
    Benefit,
}

/// A single advisory rule.
#[derive(Clone)]
pub struct AdvisoryRule {
    pub id: &'static str,
    pub kind: AdvisoryKind,
    pub message: &'static str,
    guard: fn(&AdvisoryContext) -> bool,
}

impl AdvisoryRule {
    pub fn warning(id: &'static str, message: &'static str, guard: fn(&AdvisoryContext) -> bool) -> Self {
        Self {
            id,
            kind: AdvisoryKind::Warning,
            message,
            guard,
        }
    }

    pub fn benefit(id: &'static str, message: &'static str, guard: fn(&AdvisoryContext) -> bool) -> Self {
        Self {
            id,
            kind: AdvisoryKind::Benefit,
            message,
            guard,
        }
    }

    pub fn applies(&self, ctx: &AdvisoryContext) -> bool {
        (self.guard)(ctx)
    }
}

impl fmt::Debug for AdvisoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisoryRule")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Messages produced by a rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Advisories {
    pub warnings: Vec<String>,
    pub benefits: Vec<String>,
}

/// An ordered list of advisory rules.
#[derive(Debug, Clone, Default)]
pub struct AdvisoryRules {
    pub rules: Vec<AdvisoryRule>,
}

impl AdvisoryRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// The product rule set.
    pub fn standard() -> Self {
        Self::new()
            .add(AdvisoryRule::warning(
                "minimum-high-concurrency",
                "May struggle with high concurrent user load",
                |c| c.tier == Tier::Minimum && c.concurrent_users > MINIMUM_TIER_MAX_USERS,
            ))
            .add(AdvisoryRule::warning(
                "minimum-streaming",
                "Streaming workload may cause latency issues",
                |c| c.tier == Tier::Minimum && c.ingestion_type.is_streaming(),
            ))
            .add(AdvisoryRule::warning(
                "minimum-large-volume",
                "Data volume exceeds recommended capacity",
                |c| c.tier == Tier::Minimum && c.data_volume_gb > MINIMUM_TIER_MAX_VOLUME_GB,
            ))
            .add(AdvisoryRule::warning(
                "minimum-complex-queries",
                "Complex queries may timeout",
                |c| c.tier == Tier::Minimum && c.query_complexity == QueryComplexity::Complex,
            ))
            .add(AdvisoryRule::benefit(
                "balanced-cost",
                "Optimal balance of cost and performance",
                |c| c.tier == Tier::Balanced,
            ))
            .add(AdvisoryRule::benefit(
                "balanced-concurrency",
                "Handles concurrent workloads efficiently",
                |c| c.tier == Tier::Balanced,
            ))
            .add(AdvisoryRule::benefit(
                "performance-latency",
                "Zero latency for concurrent users",
                |c| c.tier == Tier::Performance,
            ))
            .add(AdvisoryRule::benefit(
                "performance-growth",
                "Future-proof for data growth",
                |c| c.tier == Tier::Performance,
            ))
            .add(AdvisoryRule::benefit(
                "performance-throughput",
                "Maximum throughput and scalability",
                |c| c.tier == Tier::Performance,
            ))
            .add(AdvisoryRule::benefit(
                "reserved-savings",
                "30% savings with reserved capacity",
                |c| c.pricing_model == PricingModel::Reserved,
            ))
            .add(AdvisoryRule::benefit(
                "hybrid-savings",
                "Optimized cost with mixed pricing",
                |c| c.pricing_model == PricingModel::Hybrid,
            ))
    }

    pub fn add(mut self, rule: AdvisoryRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Evaluate every rule in order, then append one saturation warning per
    /// saturated platform.
    pub fn evaluate(&self, ctx: &AdvisoryContext) -> Advisories {
        let mut advisories = Advisories::default();

        for rule in self.rules.iter().filter(|r| r.applies(ctx)) {
            debug!("Advisory rule '{}' fired", rule.id);
            match rule.kind {
                AdvisoryKind::Warning => advisories.warnings.push(rule.message.to_string()),
                AdvisoryKind::Benefit => advisories.benefits.push(rule.message.to_string()),
            }
        }

        for (platform, sku) in &ctx.saturated {
            advisories.warnings.push(saturation_warning(*platform, sku));
        }

        advisories
    }
}

pub fn saturation_warning(platform: Platform, sku: &str) -> String {
    format!(
        "{} requirement exceeds the largest available SKU; capped at {}",
        platform.display_name(),
        sku
    )
}
