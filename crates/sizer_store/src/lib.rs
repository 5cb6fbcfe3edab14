//! # sizer_store
//!
//! Persistence for the DWH sizer: a small key-value store abstraction and
//! the two repositories built on it.
//!
//! - **History**: the 50 most recent calculations, newest first
//! - **Saved configurations**: named configurations with export and import
//!
//! The sizing engine never depends on this crate; callers record results
//! after computing them.

pub mod error;
pub mod history;
pub mod kv;
pub mod saved;

pub use error::{StoreError, StoreResult};
pub use history::{HistoryEntry, HistoryRepository, HistoryStats, HISTORY_KEY, MAX_HISTORY_ITEMS};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use saved::{SavedConfigRepository, SavedConfigUpdate, SavedConfiguration, SAVED_CONFIGS_KEY};
