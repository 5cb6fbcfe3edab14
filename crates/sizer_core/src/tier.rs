//! Tier classification from data volume and concurrency.

use crate::models::Tier;

/// Scores below this are [`Tier::Minimum`].
pub const BALANCED_THRESHOLD: f64 = 50.0;
/// Scores at or above this are [`Tier::Performance`].
pub const PERFORMANCE_THRESHOLD: f64 = 200.0;

/// Linear score combining data volume (in TB) and concurrency.
pub fn tier_score(data_volume_gb: f64, concurrent_users: u32) -> f64 {
    (data_volume_gb / 1024.0) * 0.6 + concurrent_users as f64 * 0.4
}

/// Bucket a workload into a tier.
///
/// Total and monotonic over non-negative finite input. Negative or
/// non-finite volume is rejected earlier by configuration validation.
pub fn classify_tier(data_volume_gb: f64, concurrent_users: u32) -> Tier {
    tier_for_score(tier_score(data_volume_gb, concurrent_users))
}

pub fn tier_for_score(score: f64) -> Tier {
    if score < BALANCED_THRESHOLD {
        Tier::Minimum
    } else if score < PERFORMANCE_THRESHOLD {
        Tier::Balanced
    } else {
        Tier::Performance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(tier_for_score(49.999), Tier::Minimum);
        assert_eq!(tier_for_score(50.0), Tier::Balanced);
        assert_eq!(tier_for_score(199.999), Tier::Balanced);
        assert_eq!(tier_for_score(200.0), Tier::Performance);
    }

    #[test]
    fn test_known_scenarios() {
        // 2 TB, 50 users: 1.2 + 20 = 21.2
        assert_eq!(classify_tier(2048.0, 50), Tier::Minimum);
        // 50 TB, 200 users: 30 + 80 = 110
        assert!((tier_score(51200.0, 200) - 110.0).abs() < 1e-9);
        assert_eq!(classify_tier(51200.0, 200), Tier::Balanced);
        assert_eq!(classify_tier(0.0, 0), Tier::Minimum);
        assert_eq!(classify_tier(0.0, 500), Tier::Performance);
    }

    #[test]
    fn test_monotonic_in_both_inputs() {
        let volumes = [0.0, 512.0, 10_240.0, 51_200.0, 102_400.0, 256_000.0, 512_000.0];
        let users = [0, 1, 10, 50, 100, 124, 125, 200, 499, 500, 1000];
        for (i, v) in volumes.iter().enumerate() {
            for (j, u) in users.iter().enumerate() {
                let tier = classify_tier(*v, *u);
                if let Some(next_v) = volumes.get(i + 1) {
                    assert!(classify_tier(*next_v, *u) >= tier);
                }
                if let Some(next_u) = users.get(j + 1) {
                    assert!(classify_tier(*v, *next_u) >= tier);
                }
            }
        }
    }
}
