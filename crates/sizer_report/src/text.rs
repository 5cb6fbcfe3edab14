//! Plain-text summary for terminals.

use std::fmt::Write;

use crate::context::ReportContext;

/// Render a human-readable summary of a sizing result.
pub fn render_text(ctx: &ReportContext<'_>) -> String {
    let config = ctx.config;
    let result = ctx.result;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Sizing for {:.2} TB, {} concurrent users ({}, {})",
        config.data_volume_tb(),
        config.concurrent_users,
        ctx.workload.name,
        ctx.region.name
    );
    let _ = write!(out, "Tier: {} (score {:.1})", result.tier, result.tier_score);
    if result.tier != result.classified_tier {
        let _ = write!(out, ", classified as {}", result.classified_tier);
    }
    out.push('\n');
    let _ = writeln!(out, "Pricing: {}", config.pricing_model);
    out.push('\n');

    let _ = writeln!(out, "{:<18} {:<10} {:>10} {:>14} {:>16}", "Platform", "SKU", "Capacity", "Monthly", "Yearly");
    for rec in result.recommendations() {
        let capacity = format!("{} {}", rec.compute_units, rec.capacity_unit);
        let _ = writeln!(
            out,
            "{:<18} {:<10} {:>10} {:>14} {:>16}{}",
            rec.platform.display_name(),
            rec.sku,
            capacity,
            ctx.region.format_amount(rec.monthly_price()),
            ctx.region.format_amount(rec.pricing.yearly_price),
            if rec.saturated { "  (capped)" } else { "" }
        );
    }
    out.push('\n');

    let breakdown = &result.cost_breakdown;
    let _ = writeln!(out, "Cost breakdown (monthly average):");
    for component in &breakdown.components {
        let _ = writeln!(
            out,
            "  {:<12} {:>14}  {:>5.1}%",
            component.label,
            ctx.region.format_amount(component.value),
            component.percentage
        );
    }
    let _ = writeln!(
        out,
        "  {:<12} {:>14}  ({} per year)",
        "Total",
        ctx.region.format_amount(breakdown.monthly_total),
        ctx.region.format_amount(breakdown.yearly_total)
    );
    if let Some(discount) = breakdown.reserved_discount {
        let _ = writeln!(out, "  Reserved discount: {} per month", ctx.region.format_amount(discount));
    }
    if let Some(savings) = breakdown.spot_savings {
        let _ = writeln!(out, "  Spot savings: {} per month", ctx.region.format_amount(savings));
    }
    out.push('\n');

    let metrics = &result.performance_metrics;
    let _ = writeln!(
        out,
        "Latency p50/p95/p99: {}/{}/{} ms, throughput {} QPS, scaling {}",
        metrics.query_latency.p50,
        metrics.query_latency.p95,
        metrics.query_latency.p99,
        metrics.throughput,
        metrics.scalability
    );
    if let Some(burst) = metrics.burst_capability {
        let _ = writeln!(out, "Burst capability: {}x", burst);
    }

    if !result.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in &result.warnings {
            let _ = writeln!(out, "  ! {}", warning);
        }
    }
    if !result.benefits.is_empty() {
        out.push_str("\nBenefits:\n");
        for benefit in &result.benefits {
            let _ = writeln!(out, "  + {}", benefit);
        }
    }

    out
}
