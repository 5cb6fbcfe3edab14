//! Integration tests for report rendering.

use std::fs;

use chrono::{TimeZone, Utc};
use sizer_core::{compute_sizing, PricingModel, ReferenceData, SizingConfig};
use sizer_report::{
    parse_share_link, render, share_link, write_report, JsonReport, ReportContext, ReportFormat,
    DEFAULT_SHARE_BASE_URL,
};
use tempfile::tempdir;

#[test]
fn test_json_report_round_trips_result() {
    let reference = ReferenceData::builtin();
    let config = SizingConfig::new(10240.0, 100).with_pricing(PricingModel::Reserved, None);
    let result = compute_sizing(&config).unwrap();
    let ctx = ReportContext::new(&reference, &config, &result).unwrap();
    let generated_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let json = render(&ctx, ReportFormat::Json, generated_at).unwrap();
    let report: JsonReport = serde_json::from_str(&json).unwrap();
    assert_eq!(report.metadata.generated_at, generated_at);
    assert_eq!(report.recommendations.tier, result.tier);
    assert_eq!(report.recommendations.synapse.sku, result.synapse.sku);
    assert_eq!(report.warnings, result.warnings);
    assert_eq!(report.benefits, result.benefits);
    assert!(report.cost_breakdown.reserved_discount.is_some());
}

#[test]
fn test_csv_uses_region_currency() {
    let reference = ReferenceData::builtin();
    let config = SizingConfig::new(500.0, 10).with_region("eu-central");
    let result = compute_sizing(&config).unwrap();
    let ctx = ReportContext::new(&reference, &config, &result).unwrap();

    let csv = render(&ctx, ReportFormat::Csv, Utc::now()).unwrap();
    assert!(csv.contains("Total Monthly,€"));
    assert!(csv.contains("Region,EU Central (Germany)"));
}

#[test]
fn test_write_report_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let reference = ReferenceData::builtin();
    let config = SizingConfig::default();
    let result = compute_sizing(&config).unwrap();
    let ctx = ReportContext::new(&reference, &config, &result).unwrap();

    for format in [ReportFormat::Text, ReportFormat::Json, ReportFormat::Csv] {
        let path = dir.path().join("reports").join(format!("sizing.{}", format.extension()));
        write_report(&ctx, format, &path).unwrap();
        assert!(!fs::read_to_string(&path).unwrap().is_empty());
    }
}

#[test]
fn test_share_link_round_trip_computes_same_result() {
    let config = SizingConfig::new(2048.0, 50)
        .with_region("ap-southeast")
        .with_pricing(PricingModel::Hybrid, Some(25.0));
    let link = share_link(DEFAULT_SHARE_BASE_URL, &config);

    let parsed = parse_share_link(&link).unwrap();
    assert_eq!(parsed, config);
    assert_eq!(compute_sizing(&parsed).unwrap(), compute_sizing(&config).unwrap());
}

#[test]
fn test_context_rejects_unknown_region() {
    let reference = ReferenceData::builtin();
    let config = SizingConfig::default();
    let result = compute_sizing(&config).unwrap();
    let unknown = config.clone().with_region("moon-base");
    assert!(ReportContext::new(&reference, &unknown, &result).is_err());
}
