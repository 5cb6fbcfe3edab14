//! Synthetic performance metrics derived from the tier and workload profile.

use serde::{Deserialize, Serialize};

use crate::models::{ScalingType, Tier};
use crate::reference::WorkloadProfile;

/// Burst factor available on the performance tier.
pub const PERFORMANCE_BURST_FACTOR: f64 = 3.0;

/// Query latency percentiles in milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryLatency {
    pub p50: u32,
    pub p95: u32,
    pub p99: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub query_latency: QueryLatency,
    /// Queries per second, as labelled in reports
    pub throughput: u32,
    pub concurrency: u32,
    pub scalability: ScalingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burst_capability: Option<f64>,
}

fn baseline_latency_ms(tier: Tier) -> f64 {
    match tier {
        Tier::Minimum => 300.0,
        Tier::Balanced => 150.0,
        Tier::Performance => 50.0,
    }
}

fn baseline_throughput(tier: Tier) -> f64 {
    match tier {
        Tier::Minimum => 100.0,
        Tier::Balanced => 500.0,
        Tier::Performance => 1000.0,
    }
}

pub fn scalability(tier: Tier) -> ScalingType {
    match tier {
        Tier::Minimum => ScalingType::Manual,
        Tier::Balanced => ScalingType::Auto,
        Tier::Performance => ScalingType::Burst,
    }
}

/// Estimate performance for `tier`. CPU-heavy workloads slow every
/// percentile and reduce throughput by the same factor.
pub fn estimate_performance(tier: Tier, profile: &WorkloadProfile, concurrent_users: u32) -> PerformanceMetrics {
    let latency_multiplier = 1.0 + profile.cpu_intensity * 0.5;
    let p50 = baseline_latency_ms(tier) * latency_multiplier;

    PerformanceMetrics {
        query_latency: QueryLatency {
            p50: p50.round() as u32,
            p95: (p50 * 1.5).round() as u32,
            p99: (p50 * 2.0).round() as u32,
        },
        throughput: (baseline_throughput(tier) / latency_multiplier).round() as u32,
        concurrency: concurrent_users,
        scalability: scalability(tier),
        burst_capability: (tier == Tier::Performance).then_some(PERFORMANCE_BURST_FACTOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;

    #[test]
    fn test_olap_balanced_metrics() {
        let data = ReferenceData::builtin();
        let olap = data.workload("olap").unwrap();
        let metrics = estimate_performance(Tier::Balanced, olap, 40);

        // 150 * (1 + 0.8 * 0.5)
        assert_eq!(metrics.query_latency.p50, 210);
        assert_eq!(metrics.query_latency.p95, 315);
        assert_eq!(metrics.query_latency.p99, 420);
        assert_eq!(metrics.throughput, 357);
        assert_eq!(metrics.concurrency, 40);
        assert_eq!(metrics.scalability, ScalingType::Auto);
        assert!(metrics.burst_capability.is_none());
    }

    #[test]
    fn test_burst_only_on_performance_tier() {
        let data = ReferenceData::builtin();
        let profile = data.default_workload();
        for tier in Tier::ALL {
            let metrics = estimate_performance(tier, profile, 1);
            assert_eq!(metrics.burst_capability.is_some(), tier == Tier::Performance);
        }
    }

    #[test]
    fn test_latency_decreases_with_tier() {
        let data = ReferenceData::builtin();
        let profile = data.workload("realtime").unwrap();
        let min = estimate_performance(Tier::Minimum, profile, 1);
        let perf = estimate_performance(Tier::Performance, profile, 1);
        assert!(perf.query_latency.p50 < min.query_latency.p50);
        assert!(perf.throughput > min.throughput);
    }
}
