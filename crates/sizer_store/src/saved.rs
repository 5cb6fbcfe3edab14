//! Named, saved sizing configurations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sizer_core::{SizingConfig, SizingResult};
use tracing::info;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::kv::{read_collection, read_collection_for_update, write_collection, KeyValueStore};

pub const SAVED_CONFIGS_KEY: &str = "dwh_sizer_saved_configs";

/// A configuration saved under a name together with its result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedConfiguration {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub config: SizingConfig,
    pub result: SizingResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update of a saved configuration's metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedConfigUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl SavedConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// Imported documents only need the saved payload; identity and
/// timestamps are always reassigned.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedConfiguration {
    name: String,
    #[serde(default)]
    description: String,
    config: SizingConfig,
    result: SizingResult,
    #[serde(default)]
    tags: Vec<String>,
}

/// Saved configurations kept in a key-value store, in save order.
pub struct SavedConfigRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SavedConfigRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        config: &SizingConfig,
        result: &SizingResult,
    ) -> StoreResult<SavedConfiguration> {
        let now = Utc::now();
        let saved = SavedConfiguration {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            config: config.clone(),
            result: result.clone(),
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
        };
        self.push(saved)
    }

    pub fn list(&self) -> StoreResult<Vec<SavedConfiguration>> {
        read_collection(&self.store, SAVED_CONFIGS_KEY)
    }

    pub fn get(&self, id: &str) -> StoreResult<Option<SavedConfiguration>> {
        Ok(self.list()?.into_iter().find(|c| c.id == id))
    }

    /// Delete a saved configuration. Returns whether it existed.
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let mut configs = self.list()?;
        let before = configs.len();
        configs.retain(|c| c.id != id);
        if configs.len() == before {
            return Ok(false);
        }
        write_collection(&mut self.store, SAVED_CONFIGS_KEY, &configs)?;
        info!("Deleted saved configuration {}", id);
        Ok(true)
    }

    /// Apply `update` and bump `updated_at`.
    pub fn update(&mut self, id: &str, update: SavedConfigUpdate) -> StoreResult<SavedConfiguration> {
        let mut configs = self.list()?;
        let saved = configs
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(name) = update.name {
            saved.name = name;
        }
        if let Some(description) = update.description {
            saved.description = description;
        }
        if let Some(tags) = update.tags {
            saved.tags = tags;
        }
        saved.updated_at = Utc::now();
        let updated = saved.clone();

        write_collection(&mut self.store, SAVED_CONFIGS_KEY, &configs)?;
        Ok(updated)
    }

    /// Pretty-printed JSON of one saved configuration.
    pub fn export_json(&self, id: &str) -> StoreResult<String> {
        let saved = self.get(id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(serde_json::to_string_pretty(&saved)?)
    }

    /// Import a previously exported configuration under a fresh id and
    /// timestamps.
    pub fn import_json(&mut self, json: &str) -> StoreResult<SavedConfiguration> {
        let imported: ImportedConfiguration =
            serde_json::from_str(json).map_err(|e| StoreError::InvalidImport(e.to_string()))?;
        imported
            .config
            .validate()
            .map_err(|e| StoreError::InvalidImport(e.to_string()))?;

        let now = Utc::now();
        let saved = SavedConfiguration {
            id: Uuid::new_v4().to_string(),
            name: imported.name,
            description: imported.description,
            config: imported.config,
            result: imported.result,
            created_at: now,
            updated_at: now,
            tags: imported.tags,
        };
        self.push(saved)
    }

    fn push(&mut self, saved: SavedConfiguration) -> StoreResult<SavedConfiguration> {
        let mut configs: Vec<SavedConfiguration> =
            read_collection_for_update(&mut self.store, SAVED_CONFIGS_KEY)?;
        configs.push(saved.clone());
        write_collection(&mut self.store, SAVED_CONFIGS_KEY, &configs)?;
        info!("Saved configuration '{}' ({})", saved.name, saved.id);
        Ok(saved)
    }
}
