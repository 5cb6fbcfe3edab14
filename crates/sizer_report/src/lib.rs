//! # sizer_report
//!
//! Renders sizing results for people and other tools:
//!
//! - JSON report document (`metadata`, `configuration`, `recommendations`,
//!   `costBreakdown`, `performanceMetrics`, `warnings`, `benefits`)
//! - Sectioned CSV report
//! - Plain-text terminal summary
//! - Shareable links encoding the basic parameters

pub mod context;
pub mod csv;
pub mod error;
pub mod json;
pub mod share;
pub mod text;

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

pub use context::{ReportContext, ReportFormat, REPORT_TITLE, REPORT_VERSION};
pub use csv::{csv_field, render_csv};
pub use error::{ReportError, ReportResult};
pub use json::{render_json, JsonReport, ReportConfiguration, ReportMetadata, ReportRecommendations};
pub use share::{encode_query, parse_share_link, share_link, DEFAULT_SHARE_BASE_URL};
pub use text::render_text;

/// Render a report in `format`.
pub fn render(ctx: &ReportContext<'_>, format: ReportFormat, generated_at: DateTime<Utc>) -> ReportResult<String> {
    match format {
        ReportFormat::Text => Ok(render_text(ctx)),
        ReportFormat::Json => render_json(ctx, generated_at),
        ReportFormat::Csv => Ok(render_csv(ctx, generated_at)),
    }
}

/// Render a report and write it to `path`.
pub fn write_report(ctx: &ReportContext<'_>, format: ReportFormat, path: impl AsRef<Path>) -> ReportResult<()> {
    let path = path.as_ref();
    let content = render(ctx, format, Utc::now())?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    info!("Wrote {} report to {:?}", format, path);
    Ok(())
}
