//! Integration tests for the sizing engine.

use std::fs;

use sizer_core::{
    apply_pricing_model, builtin_scenarios, classify_tier, compute_sizing, Catalog, ConfigPreset, IngestionType,
    Platform, PricingModel, QueryComplexity, ReferenceData, SizingConfig, SizingEngine, SizingError, SkuEntry,
    SlaRequirement, Tier, WorkloadDistribution,
};
use tempfile::tempdir;

fn assert_minimal_selection(result: &sizer_core::SizingResult, catalog: &Catalog) {
    for rec in result.recommendations() {
        let entries = catalog.entries(rec.platform);
        let position = entries.iter().position(|e| e.id == rec.sku_id).unwrap();
        let required = rec.requirement.required_units;

        assert!(entries[position].capacity as f64 >= required || rec.saturated);
        if position > 0 {
            assert!(
                (entries[position - 1].capacity as f64) < required,
                "{} is not the minimal entry for {:.2}",
                rec.sku,
                required
            );
        }
    }
}

#[test]
fn test_scenario_2tb_50_users() {
    let result = compute_sizing(&SizingConfig::new(2048.0, 50)).unwrap();

    // 2 * 0.6 + 50 * 0.4 = 21.2
    assert!((result.tier_score - 21.2).abs() < 1e-9);
    assert_eq!(result.tier, Tier::Minimum);
    assert_eq!(result.fabric.sku, "F8");
    assert_eq!(result.synapse.sku, "DW1500c");
    assert_eq!(result.databricks.sku, "Small");
    assert!(result.warnings.contains(&"May struggle with high concurrent user load".to_string()));
}

#[test]
fn test_scenario_50tb_200_users() {
    let engine = SizingEngine::builtin();
    let result = engine.compute(&SizingConfig::new(51200.0, 200)).unwrap();

    assert!((result.tier_score - 110.0).abs() < 1e-9);
    assert_eq!(result.tier, Tier::Balanced);
    assert!(!result.is_saturated());
    assert_minimal_selection(&result, engine.reference().catalog());
    assert_eq!(result.fabric.sku, "F64");
    assert_eq!(result.synapse.sku, "DW10000c");
    assert_eq!(result.databricks.sku, "X-Large");
}

#[test]
fn test_hybrid_pricing_scenario() {
    assert!((apply_pricing_model(1000.0, PricingModel::Hybrid, Some(50.0)) - 850.0).abs() < 1e-9);

    let config = SizingConfig::new(2048.0, 50).with_pricing(PricingModel::Hybrid, Some(50.0));
    let result = compute_sizing(&config).unwrap();
    for rec in result.recommendations() {
        let expected = rec.pricing.list_price * 0.85;
        assert!((rec.monthly_price() - expected).abs() < 1e-6);
        assert!(rec.pricing.reserved_price.is_some());
        assert!(rec.pricing.spot_price.is_some());
    }
    assert!(result.cost_breakdown.reserved_discount.unwrap() > 0.0);
    assert!(result.benefits.contains(&"Optimized cost with mixed pricing".to_string()));
}

#[test]
fn test_compute_is_idempotent() {
    let config = ConfigPreset::Advanced
        .config()
        .with_complexity(QueryComplexity::Moderate)
        .with_ingestion(IngestionType::Hourly)
        .with_region("ap-northeast");
    let first = compute_sizing(&config).unwrap();
    let second = compute_sizing(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_saturation_returns_largest_entries() {
    let config = SizingConfig::new(5_000_000.0, 20_000)
        .with_complexity(QueryComplexity::Complex)
        .with_sla(SlaRequirement::MissionCritical);
    let result = compute_sizing(&config).unwrap();

    assert_eq!(result.tier, Tier::Performance);
    assert_eq!(result.fabric.sku, "F512");
    assert_eq!(result.synapse.sku, "DW30000c");
    assert_eq!(result.databricks.sku, "4X-Large");
    assert!(result.recommendations().iter().all(|r| r.saturated));
    assert_eq!(result.warnings.len(), 3);
}

#[test]
fn test_cost_components_sum_to_total() {
    let configs = [
        SizingConfig::new(0.0, 1),
        SizingConfig::new(500.0, 10).with_ingestion(IngestionType::Realtime),
        SizingConfig::new(10240.0, 100).with_pricing(PricingModel::Spot, None),
        ConfigPreset::Advanced.apply(SizingConfig::new(51200.0, 200)).with_region("au-east"),
    ];

    for config in &configs {
        let breakdown = compute_sizing(config).unwrap().cost_breakdown;
        let value_sum: f64 = breakdown.components.iter().map(|c| c.value).sum();
        let pct_sum: f64 = breakdown.components.iter().map(|c| c.percentage).sum();
        assert!((value_sum - breakdown.total).abs() < 1e-6);
        assert!((pct_sum - 100.0).abs() < 1e-6);
    }
}

#[test]
fn test_tier_is_monotonic() {
    let volumes = [0.0, 1024.0, 10_240.0, 102_400.0, 1_024_000.0];
    let users = [0, 10, 100, 500, 1000];

    for (i, gb) in volumes.iter().enumerate() {
        for (j, u) in users.iter().enumerate() {
            let tier = classify_tier(*gb, *u);
            if i + 1 < volumes.len() {
                assert!(classify_tier(volumes[i + 1], *u) >= tier);
            }
            if j + 1 < users.len() {
                assert!(classify_tier(*gb, users[j + 1]) >= tier);
            }
        }
    }
}

#[test]
fn test_workload_distribution_must_sum_to_100() {
    let config = SizingConfig::new(1024.0, 10).with_distribution(WorkloadDistribution::new(50.0, 20.0, 20.0, 5.0, 0.0));
    let err = compute_sizing(&config).unwrap_err();
    assert!(matches!(err, SizingError::InvalidDistribution { .. }));
    assert!(err.is_configuration_error());
}

#[test]
fn test_advanced_preset_scales_requirements() {
    let simple = compute_sizing(&SizingConfig::new(10240.0, 100)).unwrap();
    let advanced = compute_sizing(&ConfigPreset::Advanced.apply(SizingConfig::new(10240.0, 100))).unwrap();

    for platform in Platform::ALL {
        assert!(
            advanced.recommendation(platform).requirement.adjusted_score
                > simple.recommendation(platform).requirement.adjusted_score
        );
    }
}

#[test]
fn test_custom_reference_data() {
    let catalog = Catalog::new(vec![
        SkuEntry::new(Platform::Fabric, "F1", 1, 100.0),
        SkuEntry::new(Platform::Synapse, "DW50000c", 50000, 75500.0),
        SkuEntry::new(Platform::Databricks, "Tiny", 1, 50.0),
    ])
    .unwrap();
    let builtin = ReferenceData::builtin();
    let reference = ReferenceData::new(catalog, builtin.regions().to_vec(), builtin.workloads().to_vec()).unwrap();

    let result = SizingEngine::new(reference).compute(&SizingConfig::new(2048.0, 50)).unwrap();
    assert_eq!(result.synapse.sku, "DW50000c");
    assert!(result.fabric.saturated);
    assert!(result.warnings.iter().any(|w| w.contains("Microsoft Fabric")));
}

#[test]
fn test_compare_builtin_scenarios() {
    let engine = SizingEngine::builtin();
    let outcomes = engine
        .compare(&builtin_scenarios(), &SizingConfig::default().with_region("eu-west"))
        .unwrap();

    assert_eq!(outcomes.len(), 4);
    let tiers: Vec<Tier> = outcomes.iter().map(|o| o.result.tier).collect();
    assert_eq!(tiers, vec![Tier::Minimum, Tier::Minimum, Tier::Balanced, Tier::Minimum]);
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempdir().unwrap();
    let config = ConfigPreset::Advanced
        .apply(SizingConfig::new(4096.0, 75))
        .with_pricing(PricingModel::Hybrid, Some(40.0))
        .with_tier_override(Tier::Performance);

    for name in ["sizing.yaml", "sizing.json", "sizing.toml"] {
        let path = dir.path().join(name);
        config.save(&path).unwrap();
        let loaded = SizingConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config, "{} did not round trip", name);
    }
}

#[test]
fn test_config_file_errors() {
    let dir = tempdir().unwrap();

    let ini = dir.path().join("sizing.ini");
    fs::write(&ini, "dataVolumeGB=1").unwrap();
    assert!(matches!(SizingConfig::from_file(&ini), Err(SizingError::UnsupportedFormat(_))));

    let bad = dir.path().join("sizing.yaml");
    fs::write(&bad, "pricingModel: free\n").unwrap();
    let err = SizingConfig::from_file(&bad).unwrap_err();
    assert!(matches!(err, SizingError::Yaml(_)));
    assert!(err.is_configuration_error());

    let negative = dir.path().join("sizing.json");
    fs::write(&negative, r#"{"concurrentUsers": -5}"#).unwrap();
    let err = SizingConfig::from_file(&negative).unwrap_err();
    assert!(matches!(err, SizingError::Json(_)));
    assert!(err.is_configuration_error());

    let missing = dir.path().join("missing.json");
    let err = SizingConfig::from_file(&missing).unwrap_err();
    assert!(matches!(err, SizingError::Io(_)));
    assert!(!err.is_configuration_error());
}
