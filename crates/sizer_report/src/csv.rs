//! Sectioned CSV report.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::context::{ReportContext, REPORT_TITLE, REPORT_VERSION};

/// Quote a field that contains a separator, quote or line break.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn row(fields: &[&str]) -> String {
    fields.iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(",")
}

/// Render the CSV report.
pub fn render_csv(ctx: &ReportContext<'_>, generated_at: DateTime<Utc>) -> String {
    let config = ctx.config;
    let result = ctx.result;
    let mut rows: Vec<String> = Vec::new();

    rows.push(csv_field(REPORT_TITLE));
    rows.push(String::new());

    rows.push("CONFIGURATION".to_string());
    rows.push(row(&["Data Volume (GB)", &config.data_volume_gb.to_string()]));
    rows.push(row(&["Data Volume (TB)", &format!("{:.2}", config.data_volume_tb())]));
    rows.push(row(&["Concurrent Users", &config.concurrent_users.to_string()]));
    rows.push(row(&["Workload Profile", &ctx.workload.name]));
    rows.push(row(&["Region", &ctx.region.name]));
    rows.push(row(&["Pricing Model", config.pricing_model.id()]));
    if let Some(pct) = config.reserved_percentage {
        rows.push(row(&["Reserved Percentage", &format!("{}%", pct)]));
    }
    rows.push(row(&["Query Complexity", config.query_complexity.id()]));
    rows.push(row(&["Ingestion Type", config.ingestion_type.id()]));
    rows.push(row(&["SLA Requirement", config.sla_requirement.id()]));
    rows.push(String::new());

    rows.push("RECOMMENDATIONS".to_string());
    rows.push(row(&["Recommendation Tier", &result.tier.to_string().to_uppercase()]));
    if result.tier != result.classified_tier {
        rows.push(row(&["Classified Tier", &result.classified_tier.to_string().to_uppercase()]));
    }
    rows.push(String::new());

    rows.push("PLATFORM RECOMMENDATIONS".to_string());
    rows.push("Platform,SKU,Capacity,Monthly Cost,Yearly Cost".to_string());
    for rec in result.recommendations() {
        rows.push(row(&[
            rec.platform.display_name(),
            &rec.sku,
            &format!("{} {}", rec.compute_units, rec.capacity_unit),
            &ctx.money(rec.monthly_price()),
            &ctx.money(rec.pricing.yearly_price),
        ]));
    }
    rows.push(String::new());

    let breakdown = &result.cost_breakdown;
    rows.push("COST BREAKDOWN".to_string());
    rows.push("Component,Amount,Percentage".to_string());
    for component in &breakdown.components {
        rows.push(row(&[
            &component.label,
            &ctx.money(component.value),
            &format!("{:.1}%", component.percentage),
        ]));
    }
    rows.push(row(&["Total Monthly", &ctx.money(breakdown.monthly_total), "100%"]));
    rows.push(row(&["Total Yearly", &ctx.money(breakdown.yearly_total), "100%"]));
    rows.push(String::new());

    let metrics = &result.performance_metrics;
    rows.push("PERFORMANCE METRICS".to_string());
    rows.push(row(&["Query Latency P50", &format!("{}ms", metrics.query_latency.p50)]));
    rows.push(row(&["Query Latency P95", &format!("{}ms", metrics.query_latency.p95)]));
    rows.push(row(&["Query Latency P99", &format!("{}ms", metrics.query_latency.p99)]));
    rows.push(row(&["Throughput", &format!("{} QPS", metrics.throughput)]));
    rows.push(row(&["Concurrency", &format!("{} concurrent users", metrics.concurrency)]));
    rows.push(row(&["Scalability", &metrics.scalability.to_string()]));
    rows.push(String::new());

    if !result.warnings.is_empty() {
        rows.push("WARNINGS".to_string());
        rows.extend(result.warnings.iter().map(|w| csv_field(w)));
        rows.push(String::new());
    }

    if !result.benefits.is_empty() {
        rows.push("BENEFITS".to_string());
        rows.extend(result.benefits.iter().map(|b| csv_field(b)));
        rows.push(String::new());
    }

    rows.push(String::new());
    rows.push(format!(
        "Generated: {}",
        generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    rows.push(format!("Source: DWH Sizing Calculator v{}", REPORT_VERSION));

    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizer_core::{compute_sizing, IngestionType, ReferenceData, SizingConfig};

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_sections_present() {
        let reference = ReferenceData::builtin();
        let config = SizingConfig::new(2048.0, 50).with_ingestion(IngestionType::Realtime);
        let result = compute_sizing(&config).unwrap();
        let ctx = ReportContext::new(&reference, &config, &result).unwrap();

        let csv = render_csv(&ctx, Utc::now());
        for section in [
            "CONFIGURATION",
            "RECOMMENDATIONS",
            "PLATFORM RECOMMENDATIONS",
            "COST BREAKDOWN",
            "PERFORMANCE METRICS",
            "WARNINGS",
        ] {
            assert!(csv.lines().any(|l| l == section), "missing {}", section);
        }
        assert!(!csv.lines().any(|l| l == "BENEFITS"));
        assert!(csv.contains("Recommendation Tier,MINIMUM"));
        assert!(csv.contains("Microsoft Fabric,F8,8 CU,$1051.20,$12614.40"));
        assert!(csv.contains("Region,US East (Virginia)"));
        assert!(csv.ends_with("Source: DWH Sizing Calculator v3.0"));
    }
}
