//! Shareable links carrying the basic sizing parameters in a query string.
//!
//! | Key | Parameter          |
//! |-----|--------------------|
//! | dv  | data volume (GB)   |
//! | cu  | concurrent users   |
//! | wp  | workload profile   |
//! | rg  | region             |
//! | pm  | pricing model      |
//! | rp  | reserved percentage (hybrid only) |
//! | qc  | query complexity   |
//! | it  | ingestion type     |

use sizer_core::{IngestionType, PricingModel, QueryComplexity, SizingConfig};
use tracing::debug;

use crate::error::{ReportError, ReportResult};

pub const DEFAULT_SHARE_BASE_URL: &str = "https://dwh-sizer.local/";

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~')
}

fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

fn decode_component(value: &str) -> ReportResult<String> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = value
                    .get(i + 1..i + 3)
                    .filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()))
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| ReportError::InvalidShareLink(format!("bad escape in '{}'", value)))?;
                out.push(hex);
                i += 2;
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8(out).map_err(|_| ReportError::InvalidShareLink(format!("'{}' is not UTF-8", value)))
}

/// Query string for `config`.
pub fn encode_query(config: &SizingConfig) -> String {
    let mut params: Vec<(&str, String)> = vec![
        ("dv", config.data_volume_gb.to_string()),
        ("cu", config.concurrent_users.to_string()),
        ("wp", config.workload_profile.clone()),
        ("rg", config.region.clone()),
        ("pm", config.pricing_model.id().to_string()),
    ];
    if config.pricing_model == PricingModel::Hybrid {
        if let Some(pct) = config.reserved_percentage {
            params.push(("rp", pct.to_string()));
        }
    }
    params.push(("qc", config.query_complexity.id().to_string()));
    params.push(("it", config.ingestion_type.id().to_string()));

    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Link to `base_url` carrying the parameters of `config`.
pub fn share_link(base_url: &str, config: &SizingConfig) -> String {
    let base = base_url.split(['?', '#']).next().unwrap_or(base_url);
    format!("{}?{}", base, encode_query(config))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> ReportResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ReportError::InvalidShareLink(format!("{}={} is not a number", key, value)))
}

/// Rebuild a configuration from a share link or bare query string.
///
/// Missing keys keep their default values, except that query complexity
/// defaults to complex. Unknown keys are ignored and unknown enum values are
/// rejected.
pub fn parse_share_link(link: &str) -> ReportResult<SizingConfig> {
    let query = match link.split_once('?') {
        Some((_, query)) => query,
        None => link,
    };
    let query = query.split('#').next().unwrap_or(query);

    let mut config = SizingConfig::default().with_complexity(QueryComplexity::Complex);
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_component(raw)?;

        match key {
            "dv" => config.data_volume_gb = parse_number(key, &value)?,
            "cu" => config.concurrent_users = parse_number(key, &value)?,
            "wp" => config.workload_profile = value,
            "rg" => config.region = value,
            "pm" => config.pricing_model = value.parse::<PricingModel>()?,
            "rp" => config.reserved_percentage = Some(parse_number(key, &value)?),
            "qc" => config.query_complexity = value.parse::<QueryComplexity>()?,
            "it" => config.ingestion_type = value.parse::<IngestionType>()?,
            other => debug!("Ignoring unknown share parameter '{}'", other),
        }
    }
    Ok(config)
}
