//! Inputs shared by every renderer.

use std::fmt;
use std::str::FromStr;

use sizer_core::{ReferenceData, Region, SizingConfig, SizingResult, WorkloadProfile};

use crate::error::{ReportError, ReportResult};

pub const REPORT_TITLE: &str = "DWH Sizing Calculator Report";
pub const REPORT_VERSION: &str = "3.0";

/// A configuration, its result, and the reference rows it names.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub config: &'a SizingConfig,
    pub result: &'a SizingResult,
    pub region: &'a Region,
    pub workload: &'a WorkloadProfile,
}

impl<'a> ReportContext<'a> {
    /// Resolve the region and workload profile named by `config`.
    pub fn new(reference: &'a ReferenceData, config: &'a SizingConfig, result: &'a SizingResult) -> ReportResult<Self> {
        Ok(Self {
            config,
            result,
            region: reference.region(&config.region)?,
            workload: reference.workload(&config.workload_profile)?,
        })
    }

    pub fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.region.symbol, amount)
    }
}

/// Output format of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}
