//! SKU catalogs for the three platform families.
//!
//! Entries are kept in ascending capacity order per platform so that "first
//! entry meeting a requirement" is well defined. Selection saturates: a
//! requirement above every entry yields the largest one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SizerResult, SizingError};
use crate::models::{CapacityUnit, Platform, ScalingType};

/// Monthly list price per DWU for the warehouse catalog.
const SYNAPSE_PRICE_PER_DWU: f64 = 1.51;

/// Hardware characteristics of one SKU, derived from its capacity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkuSpecs {
    pub cores: u32,
    pub memory_gb: u32,
    /// Storage offering label
    pub storage: String,
    /// Storage bundled with the SKU
    pub storage_included: String,
    pub concurrent_queries: u32,
    pub max_users: u32,
    pub scaling_type: ScalingType,
}

impl SkuSpecs {
    /// Derive the specs of a `platform` SKU with `capacity` units.
    ///
    /// These are fixed linear functions of capacity, not independently
    /// configurable. Products saturate at `u32::MAX`.
    pub fn derive(platform: Platform, capacity: u32) -> Self {
        match platform {
            Platform::Fabric => Self {
                cores: capacity,
                memory_gb: capacity.saturating_mul(8),
                storage: "OneLake (Unlimited)".to_string(),
                storage_included: format!("{} GB", capacity.saturating_mul(10)),
                concurrent_queries: capacity.saturating_mul(2),
                max_users: capacity.saturating_mul(10),
                scaling_type: ScalingType::Burst,
            },
            Platform::Synapse => Self {
                cores: (capacity as f64 / 15.0).round() as u32,
                memory_gb: (capacity as f64 * 0.6).round() as u32,
                storage: "240 TB (Separate Billing)".to_string(),
                storage_included: "240 TB".to_string(),
                concurrent_queries: (capacity / 100).max(4),
                max_users: (capacity / 50).max(10),
                scaling_type: ScalingType::Manual,
            },
            Platform::Databricks => Self {
                cores: capacity.saturating_mul(2),
                memory_gb: capacity.saturating_mul(8),
                storage: "Data Lake (Separate Billing)".to_string(),
                storage_included: "0 (Billed separately)".to_string(),
                concurrent_queries: capacity / 2,
                max_users: capacity,
                scaling_type: ScalingType::Auto,
            },
        }
    }
}

/// A fixed, named capacity offering for one platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkuEntry {
    pub id: String,
    pub platform: Platform,
    pub name: String,
    /// Capacity in the platform's unit (CU, DWU or DBU)
    pub capacity: u32,
    pub capacity_unit: CapacityUnit,
    /// List price per month before region and pricing-model adjustments
    pub base_price: f64,
    pub specs: SkuSpecs,
}

impl SkuEntry {
    pub fn new(platform: Platform, name: impl Into<String>, capacity: u32, base_price: f64) -> Self {
        let name = name.into();
        let slug = name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect::<String>();
        Self {
            id: format!("{}-{}", platform.id(), slug),
            platform,
            name,
            capacity,
            capacity_unit: platform.capacity_unit(),
            base_price,
            specs: SkuSpecs::derive(platform, capacity),
        }
    }
}

/// Outcome of picking a catalog entry for a requirement.
#[derive(Debug, Clone, Copy)]
pub struct SkuSelection<'a> {
    pub entry: &'a SkuEntry,
    /// The requirement exceeded every entry and the largest was returned
    pub saturated: bool,
}

/// Per-platform ordered SKU lists.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: BTreeMap<Platform, Vec<SkuEntry>>,
}

impl Catalog {
    /// Build a catalog from arbitrary entries.
    ///
    /// Entries are sorted by capacity within each platform. Every platform
    /// must have at least one entry, and prices and capacities must be
    /// positive.
    pub fn new(entries: Vec<SkuEntry>) -> SizerResult<Self> {
        let mut by_platform: BTreeMap<Platform, Vec<SkuEntry>> = BTreeMap::new();

        for entry in entries {
            if entry.capacity == 0 {
                return Err(SizingError::InvalidCatalog(format!("SKU '{}' has zero capacity", entry.id)));
            }
            if !(entry.base_price.is_finite() && entry.base_price > 0.0) {
                return Err(SizingError::InvalidCatalog(format!(
                    "SKU '{}' has non-positive price {}",
                    entry.id, entry.base_price
                )));
            }
            by_platform.entry(entry.platform).or_default().push(entry);
        }

        for platform in Platform::ALL {
            match by_platform.get_mut(&platform) {
                Some(list) => list.sort_by_key(|e| e.capacity),
                None => {
                    return Err(SizingError::InvalidCatalog(format!(
                        "no SKUs defined for {}",
                        platform
                    )))
                }
            }
        }

        Ok(Self { entries: by_platform })
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        let fabric = [
            ("F2", 2, 262.8),
            ("F4", 4, 525.6),
            ("F8", 8, 1051.2),
            ("F16", 16, 2102.4),
            ("F32", 32, 4204.8),
            ("F64", 64, 8409.6),
            ("F128", 128, 16819.2),
            ("F256", 256, 33638.4),
            ("F512", 512, 67276.8),
        ];
        let synapse_dwu = [
            100, 200, 300, 400, 500, 1000, 1500, 2000, 2500, 3000, 5000, 6000, 7500, 10000, 15000, 30000,
        ];
        let databricks = [
            ("2X-Small", 4, 250.0),
            ("X-Small", 8, 500.0),
            ("Small", 16, 1000.0),
            ("Medium", 32, 2000.0),
            ("Large", 64, 4000.0),
            ("X-Large", 128, 8000.0),
            ("2X-Large", 256, 16000.0),
            ("3X-Large", 384, 24000.0),
            ("4X-Large", 512, 32000.0),
        ];

        let mut entries: BTreeMap<Platform, Vec<SkuEntry>> = BTreeMap::new();
        entries.insert(
            Platform::Fabric,
            fabric
                .iter()
                .map(|(name, cu, price)| SkuEntry::new(Platform::Fabric, *name, *cu, *price))
                .collect(),
        );
        entries.insert(
            Platform::Synapse,
            synapse_dwu
                .iter()
                .map(|dwu| {
                    SkuEntry::new(
                        Platform::Synapse,
                        format!("DW{}c", dwu),
                        *dwu,
                        *dwu as f64 * SYNAPSE_PRICE_PER_DWU,
                    )
                })
                .collect(),
        );
        entries.insert(
            Platform::Databricks,
            databricks
                .iter()
                .map(|(name, dbu, price)| SkuEntry::new(Platform::Databricks, *name, *dbu, *price))
                .collect(),
        );

        Self { entries }
    }

    /// Entries for a platform in ascending capacity order.
    pub fn entries(&self, platform: Platform) -> &[SkuEntry] {
        self.entries.get(&platform).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up an entry by id across all platforms.
    pub fn get(&self, id: &str) -> Option<&SkuEntry> {
        self.entries.values().flatten().find(|e| e.id == id)
    }

    /// Select the smallest entry whose capacity meets `required_units`,
    /// falling back to the largest entry.
    pub fn select(&self, platform: Platform, required_units: f64) -> SizerResult<SkuSelection<'_>> {
        let entries = self.entries(platform);
        let largest = entries
            .last()
            .ok_or_else(|| SizingError::InvalidCatalog(format!("no SKUs defined for {}", platform)))?;

        let selection = match entries.iter().find(|e| e.capacity as f64 >= required_units) {
            Some(entry) => SkuSelection {
                entry,
                saturated: false,
            },
            None => SkuSelection {
                entry: largest,
                saturated: true,
            },
        };

        debug!(
            "Selected {} {} for {:.2} required {} (saturated: {})",
            platform, selection.entry.name, required_units, largest.capacity_unit, selection.saturated
        );
        Ok(selection)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
