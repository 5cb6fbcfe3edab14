//! Capped calculation history, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sizer_core::{SizingConfig, SizingResult};
use tracing::info;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::kv::{read_collection, read_collection_for_update, write_collection, KeyValueStore};

pub const HISTORY_KEY: &str = "dwh_sizer_history";
/// Entries kept before the oldest is dropped.
pub const MAX_HISTORY_ITEMS: usize = 50;

/// One recorded calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub config: SizingConfig,
    pub result: SizingResult,
    pub timestamp: DateTime<Utc>,
}

/// Monthly cost statistics over the history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_entries: usize,
    pub average_monthly_cost: f64,
    pub min_monthly_cost: f64,
    pub max_monthly_cost: f64,
    /// Monthly totals, newest first
    pub cost_trend: Vec<f64>,
}

impl HistoryStats {
    fn from_entries(entries: &[HistoryEntry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let cost_trend: Vec<f64> = entries
            .iter()
            .map(|e| e.result.cost_breakdown.monthly_total)
            .collect();
        let sum: f64 = cost_trend.iter().sum();

        Some(Self {
            total_entries: entries.len(),
            average_monthly_cost: sum / entries.len() as f64,
            min_monthly_cost: cost_trend.iter().copied().fold(f64::INFINITY, f64::min),
            max_monthly_cost: cost_trend.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            cost_trend,
        })
    }
}

/// History of calculations kept in a key-value store.
pub struct HistoryRepository<S: KeyValueStore> {
    store: S,
    capacity: usize,
}

impl<S: KeyValueStore> HistoryRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            capacity: MAX_HISTORY_ITEMS,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record a calculation at the front, dropping the oldest entries
    /// beyond capacity.
    pub fn append(&mut self, config: &SizingConfig, result: &SizingResult) -> StoreResult<HistoryEntry> {
        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            config: config.clone(),
            result: result.clone(),
            timestamp: Utc::now(),
        };

        let mut entries: Vec<HistoryEntry> = read_collection_for_update(&mut self.store, HISTORY_KEY)?;
        entries.insert(0, entry.clone());
        entries.truncate(self.capacity);
        write_collection(&mut self.store, HISTORY_KEY, &entries)?;

        info!("Recorded history entry {} ({} kept)", entry.id, entries.len());
        Ok(entry)
    }

    /// Entries, newest first.
    pub fn list(&self) -> StoreResult<Vec<HistoryEntry>> {
        read_collection(&self.store, HISTORY_KEY)
    }

    pub fn clear(&mut self) -> StoreResult<()> {
        self.store.remove(HISTORY_KEY)?;
        info!("Cleared calculation history");
        Ok(())
    }

    /// `None` when the history is empty.
    pub fn stats(&self) -> StoreResult<Option<HistoryStats>> {
        Ok(HistoryStats::from_entries(&self.list()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::kv::{MemoryStore, MockKeyValueStore};
    use sizer_core::compute_sizing;

    fn sample(gb: f64, users: u32) -> (SizingConfig, SizingResult) {
        let config = SizingConfig::new(gb, users);
        let result = compute_sizing(&config).unwrap();
        (config, result)
    }

    #[test]
    fn test_append_newest_first_with_cap() {
        let mut repo = HistoryRepository::new(MemoryStore::new()).with_capacity(3);
        for users in 1..=5 {
            let (config, result) = sample(1024.0, users);
            repo.append(&config, &result).unwrap();
        }

        let entries = repo.list().unwrap();
        assert_eq!(entries.len(), 3);
        let users: Vec<u32> = entries.iter().map(|e| e.config.concurrent_users).collect();
        assert_eq!(users, vec![5, 4, 3]);
    }

    #[test]
    fn test_stats() {
        let mut repo = HistoryRepository::new(MemoryStore::new());
        assert!(repo.stats().unwrap().is_none());

        let (small_config, small) = sample(100.0, 5);
        let (large_config, large) = sample(51200.0, 200);
        repo.append(&small_config, &small).unwrap();
        repo.append(&large_config, &large).unwrap();

        let stats = repo.stats().unwrap().unwrap();
        assert_eq!(stats.total_entries, 2);
        let small_total = small.cost_breakdown.monthly_total;
        let large_total = large.cost_breakdown.monthly_total;
        assert!((stats.cost_trend[0] - large_total).abs() < 1e-6);
        assert!((stats.min_monthly_cost - small_total).abs() < 1e-6);
        assert!((stats.max_monthly_cost - large_total).abs() < 1e-6);
        assert!((stats.average_monthly_cost - (small_total + large_total) / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_clear() {
        let mut repo = HistoryRepository::new(MemoryStore::new());
        let (config, result) = sample(100.0, 5);
        repo.append(&config, &result).unwrap();
        repo.clear().unwrap();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_write_failure_is_returned() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .returning(|_, _| Err(StoreError::Backend("quota exceeded".to_string())));

        let mut repo = HistoryRepository::new(store);
        let (config, result) = sample(100.0, 5);
        let err = repo.append(&config, &result).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn test_corrupt_history_reads_as_empty() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .withf(|key| key.to_string() == HISTORY_KEY)
            .returning(|_| Ok(Some("[{\"broken\": ".to_string())));

        let repo = HistoryRepository::new(store);
        assert!(repo.list().unwrap().is_empty());
        assert!(repo.stats().unwrap().is_none());
    }
}
