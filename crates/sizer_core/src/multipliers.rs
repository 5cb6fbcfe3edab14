//! Scaling factors applied to raw platform requirement scores.
//!
//! Every factor is a direct table lookup over a closed enum and is strictly
//! positive.

use serde::{Deserialize, Serialize};

use crate::error::{SizerResult, SizingError};
use crate::models::{IngestionType, QueryComplexity, SlaRequirement, Tier};

const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

pub fn complexity_multiplier(complexity: QueryComplexity) -> f64 {
    match complexity {
        QueryComplexity::Simple => 1.0,
        QueryComplexity::Moderate => 1.5,
        QueryComplexity::Complex => 2.5,
    }
}

pub fn ingestion_multiplier(ingestion: IngestionType) -> f64 {
    match ingestion {
        IngestionType::Batch => 1.0,
        IngestionType::Hourly => 1.15,
        IngestionType::Realtime => 1.4,
        IngestionType::OnDemand => 0.9,
    }
}

pub fn sla_multiplier(sla: SlaRequirement) -> f64 {
    match sla {
        SlaRequirement::BestEffort => 0.8,
        SlaRequirement::Standard => 1.0,
        SlaRequirement::Premium => 1.3,
        SlaRequirement::MissionCritical => 1.6,
    }
}

/// Adjustment applied after base scoring.
pub fn tier_multiplier(tier: Tier) -> f64 {
    match tier {
        Tier::Minimum => 0.6,
        Tier::Balanced => 1.0,
        Tier::Performance => 1.5,
    }
}

/// `1 + rate/100`. Callers validate `rate > -100`.
pub fn growth_adjustment(annual_growth_rate_percent: f64) -> f64 {
    1.0 + annual_growth_rate_percent / 100.0
}

/// Percentage split of query load across workload categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct WorkloadDistribution {
    pub olap: f64,
    pub oltp: f64,
    pub etl: f64,
    pub ml: f64,
    pub realtime: f64,
}

impl WorkloadDistribution {
    /// Per-category weights, in field order.
    pub const WEIGHTS: [f64; 5] = [1.2, 1.5, 1.3, 2.0, 1.8];

    pub fn new(olap: f64, oltp: f64, etl: f64, ml: f64, realtime: f64) -> Self {
        Self {
            olap,
            oltp,
            etl,
            ml,
            realtime,
        }
    }

    /// Product default: OLAP-heavy mixed load.
    pub fn product_default() -> Self {
        Self::new(50.0, 20.0, 20.0, 5.0, 5.0)
    }

    fn shares(&self) -> [(&'static str, f64); 5] {
        [
            ("olap", self.olap),
            ("oltp", self.oltp),
            ("etl", self.etl),
            ("ml", self.ml),
            ("realtime", self.realtime),
        ]
    }

    pub fn total(&self) -> f64 {
        self.shares().iter().map(|(_, v)| v).sum()
    }

    /// Each share must lie in 0-100 and the shares must sum to 100.
    pub fn validate(&self) -> SizerResult<()> {
        for (category, value) in self.shares() {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(SizingError::InvalidDistributionShare {
                    category: category.to_string(),
                    value,
                });
            }
        }
        let total = self.total();
        if (total - 100.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(SizingError::InvalidDistribution { total });
        }
        Ok(())
    }

    /// Weighted sum of category weights scaled by share/100.
    pub fn multiplier(&self) -> f64 {
        self.shares()
            .iter()
            .zip(Self::WEIGHTS)
            .map(|((_, share), weight)| share / 100.0 * weight)
            .sum()
    }
}

/// Every factor resolved for one configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MultiplierSet {
    pub complexity: f64,
    pub ingestion: f64,
    pub peak_usage: f64,
    pub sla: f64,
    pub workload: f64,
    pub growth: f64,
    pub tier: f64,
}

impl MultiplierSet {
    /// All factors neutral.
    pub fn neutral() -> Self {
        Self {
            complexity: 1.0,
            ingestion: 1.0,
            peak_usage: 1.0,
            sla: 1.0,
            workload: 1.0,
            growth: 1.0,
            tier: 1.0,
        }
    }

    /// Product of every factor.
    pub fn combined(&self) -> f64 {
        self.complexity * self.without_complexity()
    }

    /// Product of every factor except complexity, for platforms where
    /// complexity enters through slot sizing instead.
    pub fn without_complexity(&self) -> f64 {
        self.ingestion * self.peak_usage * self.sla * self.workload * self.growth * self.tier
    }
}

impl Default for MultiplierSet {
    fn default() -> Self {
        Self::neutral()
    }
}
